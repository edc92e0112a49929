use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{PasswordField, UserFields, UserPublic};
use crate::schema::Schema;

#[derive(Debug, Clone, PartialEq, Eq, Validate, Deserialize, ToSchema)]
pub struct LoginUserBody {
    #[serde(flatten)]
    #[validate(nested)]
    pub user: UserFields,
    #[serde(flatten)]
    #[validate(nested)]
    pub credentials: PasswordField,
}

impl Schema for LoginUserBody {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginUserPublic {
    #[serde(flatten)]
    pub user: UserFields,
}

impl From<LoginUserBody> for LoginUserPublic {
    fn from(body: LoginUserBody) -> Self {
        Self { user: body.user }
    }
}

/// Authorization code handed back by Google after consent. The code is
/// opaque and passed on as-is.
#[derive(Debug, Clone, PartialEq, Eq, Validate, Deserialize, ToSchema)]
pub struct CallbackGoogleBody {
    #[schema(example = "sdadadfa")]
    pub code: String,
}

impl Schema for CallbackGoogleBody {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CallbackGooglePublic {
    #[serde(flatten)]
    pub user: UserFields,
}

impl From<UserPublic> for CallbackGooglePublic {
    fn from(public: UserPublic) -> Self {
        Self { user: public.user }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogoutUserPublic {
    #[schema(example = "OK")]
    pub message: String,
}

impl Default for LogoutUserPublic {
    fn default() -> Self {
        Self {
            message: "OK".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPublic {
    #[schema(example = "asfnbmbmbewrqdijhdsfafgsdhhvbxcbfgerydgsfgagf")]
    pub access_token: String,
}

impl RefreshPublic {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}
