use envoice::*;
use rust_decimal_macros::dec;

fn main() -> Result<()> {
    // Reads ENVOICE_API_KEY (and optionally ENVOICE_API_URL)
    let client = EnvoiceClient::from_env()?;

    let result = client
        .invoice()
        .number("2026-001")
        .date("2026-01-15")
        .due_date("2026-02-14")
        .seller(
            PartyBuilder::new("Acme GmbH")
                .street("Friedrichstraße 123")
                .city("Berlin")
                .postal_code("10115")
                .country("DE")
                .vat_id("DE123456789")
                .email("billing@acme.de"),
        )
        .buyer(
            PartyBuilder::new("Customer AG")
                .street("Marienplatz 1")
                .city("München")
                .postal_code("80331")
                .country("DE"),
        )
        .add_item("Consulting", dec!(10), dec!(150))
        .add_item_with("Hosting (monthly)", dec!(1), dec!(49.90), "MON", dec!(19))
        .payment(
            PaymentInfo::new()
                .iban("DE89370400440532013000")
                .bic("COBADEFFXXX")
                .terms("Payable within 30 days"),
        )
        .template(Template::Classic)
        .locale("de")
        .footer_text("Vielen Dank für Ihren Auftrag!")
        .generate()?;

    match result {
        InvoiceResult::Success(success) => {
            success.save_pdf(&success.filename)?;
            println!(
                "Saved {} ({} {})",
                success.filename, success.validation.profile, success.validation.status
            );
            if let Some(account) = &success.account {
                println!("Remaining invoices this period: {}", account.remaining);
            }
        }
        InvoiceResult::Failure(failure) => {
            println!("Invoice rejected:\n{}", failure.to_user_message());
        }
    }
    Ok(())
}
