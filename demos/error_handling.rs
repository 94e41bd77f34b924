use envoice::*;
use rust_decimal_macros::dec;

fn main() {
    // ── 1. Local validation: nothing is sent ──────────────────────────
    println!("=== Missing fields ===");
    let client = EnvoiceClient::new("env_sandbox_placeholder").unwrap();
    match client.invoice().number("2026-003").generate() {
        Ok(InvoiceResult::Failure(failure)) => {
            for e in failure.errors() {
                println!("  {e}");
            }
        }
        Ok(InvoiceResult::Success(_)) => println!("  unexpected success"),
        Err(e) => println!("  error: {e}"),
    }

    // ── 2. Bad configuration ──────────────────────────────────────────
    println!("\n=== Configuration ===");
    if let Err(e) = EnvoiceClient::new("   ") {
        println!("  {e}");
    }

    // ── 3. Service errors ─────────────────────────────────────────────
    println!("\n=== Service ===");
    let client = match EnvoiceClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            println!("  skipped: {e}");
            return;
        }
    };
    let outcome = client
        .invoice()
        .number("2026-003")
        .date("2026-01-15")
        .seller(PartyBuilder::new("Acme GmbH").vat_id("not-a-vat-id"))
        .buyer(PartyBuilder::new("Customer AG"))
        .add_item("Consulting", dec!(1), dec!(100))
        .generate();

    match outcome {
        Ok(InvoiceResult::Success(success)) => println!("  generated {}", success.filename),
        Ok(InvoiceResult::Failure(failure)) => {
            println!("  rejected by the service:\n{}", failure.to_user_message());
        }
        Err(EnvoiceError::QuotaExceeded { message }) => {
            println!("  quota exhausted: {message}");
        }
        Err(e) if e.is_timeout() => println!("  timed out, try again later"),
        Err(e) => println!("  failed (status {:?}, code {:?}): {e}", e.status(), e.code()),
    }
}
