use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rust_decimal::Decimal;

use super::date::IntoDateString;
use super::error::Result;
use super::result::{InvoiceFailure, InvoiceResult};
use super::types::*;
use crate::client::EnvoiceClient;

/// A finalized builder: either a request ready to send or the local
/// validation failure that stops it from being sent.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedInvoice {
    Ready(GenerateRequest),
    Rejected(InvoiceFailure),
}

impl From<GenerateRequest> for PreparedInvoice {
    fn from(request: GenerateRequest) -> Self {
        Self::Ready(request)
    }
}

impl From<InvoiceFailure> for PreparedInvoice {
    fn from(failure: InvoiceFailure) -> Self {
        Self::Rejected(failure)
    }
}

/// Fluent builder for an invoice, created by [`EnvoiceClient::invoice`].
///
/// ```no_run
/// # fn main() -> envoice::Result<()> {
/// use envoice::*;
/// use rust_decimal::Decimal;
///
/// let client = EnvoiceClient::new("env_sandbox_xxx")?;
/// let result = client
///     .invoice()
///     .number("2026-001")
///     .date("2026-01-15")
///     .seller(PartyBuilder::new("Acme GmbH").vat_id("DE123456789").city("Berlin").country("DE"))
///     .buyer(PartyBuilder::new("Kunde AG").city("München").country("DE"))
///     .add_item("Consulting", Decimal::new(10, 0), Decimal::new(150, 0))
///     .generate()?;
///
/// match result {
///     InvoiceResult::Success(pdf) => pdf.save_pdf("out/invoice-2026-001.pdf")?,
///     InvoiceResult::Failure(failure) => eprintln!("{}", failure.to_user_message()),
/// }
/// # Ok(())
/// # }
/// ```
///
/// Finalizing does not consume the builder: calling `generate` twice
/// rebuilds the same request and sends it again.
#[derive(Debug, Clone)]
pub struct InvoiceBuilder<'a> {
    client: &'a EnvoiceClient,
    number: Option<String>,
    date: Option<String>,
    due_date: Option<String>,
    seller: Option<Party>,
    buyer: Option<Party>,
    items: Vec<LineItem>,
    payment: Option<PaymentInfo>,
    currency: String,
    template: Template,
    locale: String,
    customization: Customization,
}

impl<'a> InvoiceBuilder<'a> {
    pub(crate) fn new(client: &'a EnvoiceClient) -> Self {
        Self {
            client,
            number: None,
            date: None,
            due_date: None,
            seller: None,
            buyer: None,
            items: Vec::new(),
            payment: None,
            currency: DEFAULT_CURRENCY.to_string(),
            template: Template::default(),
            locale: DEFAULT_LOCALE.to_string(),
            customization: Customization::default(),
        }
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Issue date, as a [`chrono::NaiveDate`] or a "YYYY-MM-DD" string.
    pub fn date(mut self, date: impl IntoDateString) -> Self {
        self.date = Some(date.into_date_string());
        self
    }

    pub fn due_date(mut self, date: impl IntoDateString) -> Self {
        self.due_date = Some(date.into_date_string());
        self
    }

    /// Accepts a [`Party`] or a [`PartyBuilder`].
    pub fn seller(mut self, party: impl Into<Party>) -> Self {
        self.seller = Some(party.into());
        self
    }

    pub fn buyer(mut self, party: impl Into<Party>) -> Self {
        self.buyer = Some(party.into());
        self
    }

    /// Append a line with unit "C62" and 19% VAT.
    pub fn add_item(
        mut self,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        self.items.push(LineItem::new(description, quantity, unit_price));
        self
    }

    /// Append a line with an explicit unit and VAT rate.
    pub fn add_item_with(
        mut self,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        unit: impl Into<String>,
        vat_rate: Decimal,
    ) -> Self {
        self.items.push(
            LineItem::new(description, quantity, unit_price)
                .unit(unit)
                .vat_rate(vat_rate),
        );
        self
    }

    pub fn add_item_object(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Replace all lines added so far.
    pub fn items(mut self, items: impl IntoIterator<Item = LineItem>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    pub fn payment(mut self, payment: impl Into<PaymentInfo>) -> Self {
        self.payment = Some(payment.into());
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = code.into();
        self
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Label language (e.g. "de", "en", "fr", "es", "it").
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Read a logo image from disk and embed it base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`EnvoiceError::Io`](crate::EnvoiceError::Io) if the file cannot be read.
    pub fn logo_from_file(mut self, path: impl AsRef<Path>, width_mm: Option<u32>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        self.customization.logo_base64 = Some(STANDARD.encode(bytes));
        if width_mm.is_some() {
            self.customization.logo_width_mm = width_mm;
        }
        Ok(self)
    }

    pub fn logo_from_base64(mut self, data: impl Into<String>, width_mm: Option<u32>) -> Self {
        self.customization.logo_base64 = Some(data.into());
        if width_mm.is_some() {
            self.customization.logo_width_mm = width_mm;
        }
        self
    }

    pub fn footer_text(mut self, text: impl Into<String>) -> Self {
        self.customization.footer_text = Some(text.into());
        self
    }

    /// Hex color code, e.g. "#0055aa".
    pub fn accent_color(mut self, color: impl Into<String>) -> Self {
        self.customization.accent_color = Some(color.into());
        self
    }

    /// Run the required-field checks and assemble the request. No I/O.
    ///
    /// All missing fields are reported, not just the first.
    pub fn prepare(&self) -> PreparedInvoice {
        let number = self.number.as_deref().filter(|n| !n.is_empty());
        let date = self.date.as_deref().filter(|d| !d.is_empty());
        let (Some(number), Some(date), Some(seller), Some(buyer), false) = (
            number,
            date,
            self.seller.as_ref(),
            self.buyer.as_ref(),
            self.items.is_empty(),
        ) else {
            let failure = InvoiceFailure::from_nonempty(self.missing_fields());
            tracing::debug!(errors = failure.errors().len(), "invoice rejected before sending");
            return PreparedInvoice::Rejected(failure);
        };

        let customization = (!self.customization.is_empty()).then(|| self.customization.clone());
        PreparedInvoice::Ready(GenerateRequest {
            template: self.template,
            locale: self.locale.clone(),
            invoice: InvoiceData {
                number: number.to_string(),
                date: date.to_string(),
                due_date: self.due_date.clone(),
                seller: seller.clone(),
                buyer: buyer.clone(),
                items: self.items.clone(),
                payment: self.payment.clone(),
                currency: self.currency.clone(),
            },
            customization,
        })
    }

    fn missing_fields(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.number.as_deref().is_none_or(str::is_empty) {
            errors.push(ValidationError::required(
                "$.invoice.number",
                "Invoice number is required",
            ));
        }
        if self.date.as_deref().is_none_or(str::is_empty) {
            errors.push(ValidationError::required(
                "$.invoice.date",
                "Invoice date is required",
            ));
        }
        if self.seller.is_none() {
            errors.push(ValidationError::required(
                "$.invoice.seller",
                "Seller information is required",
            ));
        }
        if self.buyer.is_none() {
            errors.push(ValidationError::required(
                "$.invoice.buyer",
                "Buyer information is required",
            ));
        }
        if self.items.is_empty() {
            errors.push(ValidationError::required(
                "$.invoice.items",
                "At least one line item is required",
            ));
        }

        errors
    }

    /// Generate the invoice, blocking the current thread.
    ///
    /// Local validation failures return [`InvoiceResult::Failure`] without
    /// any network call.
    #[cfg(feature = "blocking")]
    pub fn generate(&self) -> Result<InvoiceResult> {
        self.client.generate(self.prepare())
    }

    /// Generate the invoice asynchronously.
    pub async fn generate_async(&self) -> Result<InvoiceResult> {
        self.client.generate_async(self.prepare()).await
    }
}

/// Builder for [`Party`] (seller/buyer).
#[derive(Debug, Clone)]
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            party: Party::new(name),
        }
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.party.street = Some(street.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.party.city = Some(city.into());
        self
    }

    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.party.postal_code = Some(postal_code.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.party.country = Some(country.into());
        self
    }

    pub fn vat_id(mut self, vat_id: impl Into<String>) -> Self {
        self.party.vat_id = Some(vat_id.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.party.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.party.phone = Some(phone.into());
        self
    }

    pub fn build(self) -> Party {
        self.party
    }
}

impl From<PartyBuilder> for Party {
    fn from(builder: PartyBuilder) -> Self {
        builder.build()
    }
}
