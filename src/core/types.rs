use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default unit of measure (UNECE Rec 20 "C62" = piece).
pub const DEFAULT_UNIT: &str = "C62";

/// Default currency code (ISO 4217).
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Default label locale.
pub const DEFAULT_LOCALE: &str = "en";

/// Default VAT rate in percent (German standard rate).
pub fn default_vat_rate() -> Decimal {
    Decimal::new(19, 0)
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// Seller or buyer on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Legal or trading name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code (e.g. "DE").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// VAT identifier (e.g. "DE123456789").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Party {
    /// A party with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            street: None,
            city: None,
            postal_code: None,
            country: None,
            vat_id: None,
            email: None,
            phone: None,
        }
    }
}

/// Invoice line. Line order is preserved on the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// Unit of measure (UNECE Rec 20, e.g. "C62" for piece, "HUR" for hour).
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Net price per unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// VAT rate in percent.
    #[serde(with = "rust_decimal::serde::float", default = "default_vat_rate")]
    pub vat_rate: Decimal,
}

impl LineItem {
    /// Line item with the default unit ("C62") and VAT rate (19%).
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit: default_unit(),
            unit_price,
            vat_rate: default_vat_rate(),
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }
}

/// Payment details printed on the invoice. No cross-field checks are done locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    /// Free-text payment terms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    /// Remittance reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl PaymentInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iban(mut self, iban: impl Into<String>) -> Self {
        self.iban = Some(iban.into());
        self
    }

    pub fn bic(mut self, bic: impl Into<String>) -> Self {
        self.bic = Some(bic.into());
        self
    }

    pub fn terms(mut self, terms: impl Into<String>) -> Self {
        self.terms = Some(terms.into());
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Visual customization of the rendered PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    /// Base64-encoded logo image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_width_mm: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    /// Hex color code (e.g. "#0055aa").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
}

impl Customization {
    /// True when none of logo, footer text or accent color is set.
    ///
    /// A logo width alone does not count: it has no effect without a logo.
    pub fn is_empty(&self) -> bool {
        self.logo_base64.is_none() && self.footer_text.is_none() && self.accent_color.is_none()
    }
}

/// Invoice contents sent to the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub number: String,
    /// Issue date, "YYYY-MM-DD".
    pub date: String,
    /// Due date, "YYYY-MM-DD".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub seller: Party,
    pub buyer: Party,
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInfo>,
    /// ISO 4217 currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Layout template used by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Minimal,
    Classic,
    Compact,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Classic => "classic",
            Self::Compact => "compact",
        }
    }

    /// Parse from the wire name ("minimal", "classic", "compact").
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "minimal" => Some(Self::Minimal),
            "classic" => Some(Self::Classic),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /v1/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub template: Template,
    #[serde(default = "default_locale")]
    pub locale: String,
    pub invoice: InvoiceData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
}

impl GenerateRequest {
    /// Request with the default template and locale and no customization.
    pub fn new(invoice: InvoiceData) -> Self {
        Self {
            template: Template::default(),
            locale: default_locale(),
            invoice,
            customization: None,
        }
    }
}

/// Severity of a [`ValidationError`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

/// A single field-level validation problem, reported locally or by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON-path-like location of the field (e.g. "$.invoice.seller.vatId").
    pub path: String,
    /// Machine-readable code (e.g. "REQUIRED", "INVALID_FORMAT").
    pub code: String,
    /// Human-readable description.
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}

impl ValidationError {
    /// An error-severity entry.
    pub fn new(
        path: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            code: code.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// A "REQUIRED" entry.
    pub fn required(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, "REQUIRED", message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

/// Outcome of the server-side ZUGFeRD/Factur-X compliance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// e.g. "valid".
    pub status: String,
    /// e.g. "EN16931".
    pub profile: String,
    /// e.g. "2.3.2".
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

/// Quota and plan snapshot of the calling account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Invoices left in the current period.
    pub remaining: i64,
    pub plan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overage_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overage_allowed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// 200 body of `POST /v1/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub pdf_base64: String,
    pub filename: String,
    pub validation: ValidationResult,
    #[serde(default)]
    pub account: Option<AccountInfo>,
}

/// Non-2xx body of any endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "validation_error").
    pub error: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<ValidationError>>,
}

impl ErrorResponse {
    /// Body used when the server's error body cannot be parsed.
    pub fn unknown(status: u16) -> Self {
        Self {
            error: "unknown_error".to_string(),
            message: Some(format!("HTTP {status}")),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_uses_camel_case_aliases() {
        let party = Party {
            postal_code: Some("10115".into()),
            vat_id: Some("DE123456789".into()),
            ..Party::new("ACME GmbH")
        };
        let json = serde_json::to_value(&party).unwrap();
        assert_eq!(json["postalCode"], "10115");
        assert_eq!(json["vatId"], "DE123456789");
        assert!(json.get("street").is_none());
        assert!(json.get("postal_code").is_none());
    }

    #[test]
    fn line_item_defaults_on_deserialize() {
        let item: LineItem =
            serde_json::from_str(r#"{"description":"Hosting","quantity":2,"unitPrice":49.5}"#)
                .unwrap();
        assert_eq!(item.unit, "C62");
        assert_eq!(item.vat_rate, Decimal::new(19, 0));
        assert_eq!(item.unit_price, Decimal::new(495, 1));
    }

    #[test]
    fn line_item_numbers_serialize_as_json_numbers() {
        let item = LineItem::new("Beratung", Decimal::new(10, 0), Decimal::new(150, 0));
        let json = serde_json::to_value(&item).unwrap();
        assert!(json["quantity"].is_number());
        assert!(json["unitPrice"].is_number());
        assert_eq!(json["vatRate"].as_f64(), Some(19.0));
    }

    #[test]
    fn template_wire_names() {
        assert_eq!(serde_json::to_value(Template::Classic).unwrap(), "classic");
        assert_eq!(Template::from_name("compact"), Some(Template::Compact));
        assert_eq!(Template::from_name("fancy"), None);
        assert_eq!(Template::default(), Template::Minimal);
    }

    #[test]
    fn validation_error_severity_defaults_to_error() {
        let err: ValidationError = serde_json::from_str(
            r#"{"path":"$.invoice.seller.vatId","code":"INVALID_FORMAT","message":"Invalid VAT ID format"}"#,
        )
        .unwrap();
        assert_eq!(err.severity, Severity::Error);
    }

    #[test]
    fn account_info_reads_wire_aliases() {
        let info: AccountInfo = serde_json::from_str(
            r#"{"remaining":0,"plan":"starter","overageCount":3,"overageAllowed":50,"warning":"low"}"#,
        )
        .unwrap();
        assert_eq!(info.overage_count, Some(3));
        assert_eq!(info.overage_allowed, Some(50));
        assert_eq!(info.warning.as_deref(), Some("low"));
    }

    #[test]
    fn customization_logo_width_alone_is_empty() {
        let c = Customization {
            logo_width_mm: Some(40),
            ..Customization::default()
        };
        assert!(c.is_empty());
    }
}
