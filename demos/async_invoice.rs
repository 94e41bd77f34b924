use envoice::*;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<()> {
    let client = EnvoiceClient::from_env()?;

    let account = client.get_account_async().await?;
    println!("Plan: {}, remaining: {}", account.plan, account.remaining);
    if let Some(warning) = &account.warning {
        println!("Warning: {warning}");
    }

    let result = client
        .invoice()
        .number("2026-002")
        .date(chrono::Local::now().date_naive())
        .seller(Party {
            city: Some("Berlin".into()),
            country: Some("DE".into()),
            vat_id: Some("DE123456789".into()),
            ..Party::new("Acme GmbH")
        })
        .buyer(Party::new("Customer AG"))
        .add_item("Support retainer", dec!(1), dec!(1200))
        .generate_async()
        .await?;

    let Some(success) = result.into_success() else {
        println!("Invoice rejected");
        return Ok(());
    };

    // Round trip: ask the service to check the PDF it just produced
    let report = client.validate_async(&success.pdf_base64).await?;
    println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    Ok(())
}
