use serde::Deserialize;
use serde_json::Value;

/// Typed outcome of a charge attempt. The mapping from raw gateway JSON is
/// total: a response either parses fully into one of these variants or it is
/// `MalformedResponse`; an ambiguous shape is never partially trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    Approved { transaction_id: String },
    Declined { transaction_id: Option<String> },
    GatewayError { transaction_id: Option<String> },
    HeldForReview { transaction_id: Option<String> },
    DuplicateSubmission { transaction_id: Option<String> },
    MalformedResponse,
    Unknown { response_code: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCreateOutcome {
    Created {
        gateway_customer_profile_id: String,
        gateway_payment_profile_id: Option<String>,
    },
    Rejected {
        code: String,
        text: String,
    },
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileUpdateOutcome {
    Updated { message: String },
    Rejected { code: String, text: String },
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileDeleteOutcome {
    Deleted,
    Rejected { code: String, text: String },
    Malformed,
}

const RESULT_OK: &str = "Ok";
const DUPLICATE_ERROR_CODE: &str = "11";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseMessages {
    result_code: String,
    #[serde(default)]
    message: Vec<ResponseMessage>,
}

#[derive(Debug, Deserialize, Default)]
struct ResponseMessage {
    #[serde(default)]
    code: String,
    #[serde(default)]
    text: String,
}

impl ResponseMessages {
    fn is_ok(&self) -> bool {
        self.result_code == RESULT_OK
    }

    fn first(&self) -> (String, String) {
        self.message
            .first()
            .map(|m| (m.code.clone(), m.text.clone()))
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChargeWire {
    transaction_response: Option<TransactionResponseWire>,
    messages: ResponseMessages,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionResponseWire {
    #[serde(default)]
    response_code: Option<String>,
    #[serde(default)]
    trans_id: Option<String>,
    #[serde(default)]
    errors: Option<TransactionErrorsWire>,
}

#[derive(Debug, Deserialize)]
struct TransactionErrorsWire {
    #[serde(default)]
    error: Vec<TransactionErrorWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionErrorWire {
    #[serde(default)]
    error_code: String,
    #[serde(default)]
    error_text: String,
}

impl TransactionResponseWire {
    fn is_duplicate(&self) -> bool {
        self.errors
            .as_ref()
            .map(|e| e.error.iter().any(|e| e.error_code == DUPLICATE_ERROR_CODE))
            .unwrap_or(false)
    }

    fn transaction_id(&self) -> Option<String> {
        self.trans_id.clone().filter(|id| !id.is_empty())
    }
}

pub fn interpret_charge(raw: Value) -> ChargeOutcome {
    let Ok(wire) = serde_json::from_value::<ChargeWire>(raw) else {
        return ChargeOutcome::MalformedResponse;
    };

    // the gateway flags a resubmitted duplicate via error code 11, with or
    // without an Ok result code
    if let Some(tr) = &wire.transaction_response {
        if tr.is_duplicate() {
            return ChargeOutcome::DuplicateSubmission {
                transaction_id: tr.transaction_id(),
            };
        }
    }

    let Some(tr) = wire.transaction_response.filter(|_| wire.messages.is_ok()) else {
        return ChargeOutcome::MalformedResponse;
    };

    let transaction_id = tr.transaction_id();
    match tr.response_code.as_deref() {
        Some("1") => match transaction_id {
            Some(transaction_id) => ChargeOutcome::Approved { transaction_id },
            None => ChargeOutcome::MalformedResponse,
        },
        Some("2") => ChargeOutcome::Declined { transaction_id },
        Some("3") => ChargeOutcome::GatewayError { transaction_id },
        Some("4") => ChargeOutcome::HeldForReview { transaction_id },
        Some(other) => ChargeOutcome::Unknown {
            response_code: other.to_string(),
        },
        None => ChargeOutcome::MalformedResponse,
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProfileWire {
    customer_profile_id: Option<String>,
    #[serde(default)]
    customer_payment_profile_id_list: Vec<String>,
    messages: ResponseMessages,
}

pub fn interpret_create_profile(raw: Value) -> ProfileCreateOutcome {
    let Ok(wire) = serde_json::from_value::<CreateProfileWire>(raw) else {
        return ProfileCreateOutcome::Malformed;
    };

    if wire.messages.is_ok() {
        let Some(gateway_customer_profile_id) =
            wire.customer_profile_id.filter(|id| !id.is_empty())
        else {
            return ProfileCreateOutcome::Malformed;
        };
        return ProfileCreateOutcome::Created {
            gateway_customer_profile_id,
            gateway_payment_profile_id: wire
                .customer_payment_profile_id_list
                .into_iter()
                .next()
                .filter(|id| !id.is_empty()),
        };
    }

    let (code, text) = wire.messages.first();
    ProfileCreateOutcome::Rejected { code, text }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusOnlyWire {
    messages: ResponseMessages,
}

pub fn interpret_update_profile(raw: Value) -> ProfileUpdateOutcome {
    let Ok(wire) = serde_json::from_value::<StatusOnlyWire>(raw) else {
        return ProfileUpdateOutcome::Malformed;
    };

    let (code, text) = wire.messages.first();
    if wire.messages.is_ok() {
        ProfileUpdateOutcome::Updated {
            message: format!("{code}: {text}"),
        }
    } else {
        ProfileUpdateOutcome::Rejected { code, text }
    }
}

pub fn interpret_delete_profile(raw: Value) -> ProfileDeleteOutcome {
    let Ok(wire) = serde_json::from_value::<StatusOnlyWire>(raw) else {
        return ProfileDeleteOutcome::Malformed;
    };

    if wire.messages.is_ok() {
        ProfileDeleteOutcome::Deleted
    } else {
        let (code, text) = wire.messages.first();
        ProfileDeleteOutcome::Rejected { code, text }
    }
}
