use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::SchemaConfig;
use crate::domain::pagination::Paginated;
use crate::domain::role::Role;
use crate::error::{Error, BODY_FIELD};
use crate::schema::Schema;
use crate::validation::phone;

pub const AT_LEAST_ONE_FIELD_MESSAGE: &str = "At least one field for user required";

/// Identity fields shared by most user payloads.
#[derive(Debug, Clone, PartialEq, Eq, Validate, Serialize, Deserialize, ToSchema)]
pub struct UserFields {
    #[validate(
        length(min = 2, max = 25, message = "Username must be 2-25 characters long"),
        custom(function = "crate::validation::validate_username")
    )]
    #[schema(example = "mister_business", min_length = 2, max_length = 25)]
    pub username: String,
    #[validate(email(message = "Email is not a valid email address"))]
    #[schema(example = "mister_business@gmail.com")]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate, Deserialize, ToSchema)]
pub struct PasswordField {
    #[validate(custom(function = "crate::validation::validate_password"))]
    #[schema(example = "Business1!", min_length = 8, max_length = 64, write_only)]
    pub password: String,
}

/// Registration input.
#[derive(Debug, Clone, PartialEq, Eq, Validate, Deserialize, ToSchema)]
pub struct UserBody {
    #[serde(flatten)]
    #[validate(nested)]
    pub user: UserFields,
    #[serde(flatten)]
    #[validate(nested)]
    pub credentials: PasswordField,
}

impl Schema for UserBody {}

impl UserBody {
    /// Public view of a freshly registered user. The password is dropped.
    pub fn into_public(self, role: Role) -> UserPublic {
        UserPublic {
            user: self.user,
            role,
            phone_number: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    #[serde(flatten)]
    pub user: UserFields,
    pub role: Role,
    #[schema(example = "+380999999999")]
    pub phone_number: Option<String>,
}

pub type UsersPublic = Paginated<UserPublic>;

/// Profile update input. `email` identifies the account; at least one of the
/// other fields must carry a change.
#[derive(Debug, Clone, PartialEq, Eq, Validate, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    #[validate(email(message = "Email is not a valid email address"))]
    #[schema(example = "mister_business@gmail.com")]
    pub email: String,
    #[validate(
        length(min = 2, max = 25, message = "Username must be 2-25 characters long"),
        custom(function = "crate::validation::validate_username")
    )]
    #[schema(example = "mister_business", min_length = 2, max_length = 25)]
    pub username: Option<String>,
    #[validate(custom(function = "crate::validation::validate_password"))]
    #[schema(example = "Business1!", min_length = 8, max_length = 64, write_only)]
    pub password: Option<String>,
    #[validate(custom(function = "crate::validation::validate_phone_number"))]
    #[schema(example = "+380999999999")]
    pub phone_number: Option<String>,
}

impl Schema for UpdateUserBody {
    fn check_invariants(&self) -> Result<(), Error> {
        // empty strings count as absent
        let provided = [&self.username, &self.password, &self.phone_number]
            .into_iter()
            .any(|field| field.as_deref().is_some_and(|value| !value.is_empty()));
        if provided {
            Ok(())
        } else {
            Err(Error::field(BODY_FIELD, AT_LEAST_ONE_FIELD_MESSAGE))
        }
    }

    fn normalize(mut self, config: &SchemaConfig) -> Result<Self, Error> {
        if let Some(raw) = self.phone_number.take() {
            let normalized = phone::normalize(&raw, config.default_country_code.as_deref())
                .map_err(|e| Error::field("phoneNumber", e.to_string()))?;
            self.phone_number = Some(normalized);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{parse_str, parse_value};
    use crate::validation::{PASSWORD_MESSAGE, USERNAME_MESSAGE};
    use rstest::rstest;
    use serde_json::{json, Value};

    fn register(body: Value) -> Result<UserBody, Error> {
        parse_value(body, &SchemaConfig::default())
    }

    fn update(body: Value, config: &SchemaConfig) -> Result<UpdateUserBody, Error> {
        parse_value(body, config)
    }

    #[test]
    fn test_registration_round_trips_to_public_projection() -> eyre::Result<()> {
        let body = register(json!({
            "username": "mister_business",
            "email": "mister_business@gmail.com",
            "password": "Business1!",
        }))?;
        assert_eq!(body.credentials.password, "Business1!");

        let public = serde_json::to_value(body.into_public(Role::User))?;
        assert_eq!(
            public,
            json!({
                "username": "mister_business",
                "email": "mister_business@gmail.com",
                "role": "user",
                "phoneNumber": null,
            })
        );
        assert!(public.get("password").is_none());
        Ok(())
    }

    #[test]
    fn test_public_projection_ignores_password_in_input() -> eyre::Result<()> {
        let public: UserPublic = serde_json::from_value(json!({
            "username": "mister_business",
            "email": "mister_business@gmail.com",
            "role": "admin",
            "phoneNumber": "+380999999999",
            "password": "Business1!",
        }))?;
        let serialized = serde_json::to_value(&public)?;
        assert!(serialized.get("password").is_none());
        assert_eq!(serialized["role"], "admin");
        Ok(())
    }

    #[rstest]
    #[case("_bad", "a@example.com", "Business1!", "username", USERNAME_MESSAGE)]
    #[case("bad_", "a@example.com", "Business1!", "username", USERNAME_MESSAGE)]
    #[case(
        "mister_business",
        "not-an-email",
        "Business1!",
        "email",
        "Email is not a valid email address"
    )]
    #[case("mister_business", "a@example.com", "12345678", "password", PASSWORD_MESSAGE)]
    #[case(
        "x",
        "a@example.com",
        "Business1!",
        "username",
        "Username must be 2-25 characters long"
    )]
    fn test_registration_rejects(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] message: &str,
    ) {
        let error = register(json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .unwrap_err();
        let errors = error.field_errors();
        assert_eq!(errors.fields(), vec![field]);
        assert_eq!(errors.get(field).unwrap().message, message);
    }

    #[rstest]
    #[case(2, true)]
    #[case(25, true)]
    #[case(26, false)]
    fn test_username_length_bounds(#[case] length: usize, #[case] accepted: bool) {
        let username = format!("m{}", "b".repeat(length - 1));
        let registration = register(json!({
            "username": username,
            "email": "a@example.com",
            "password": "Business1!",
        }));
        let profile_update = update(
            json!({"email": "a@example.com", "username": username}),
            &SchemaConfig::default(),
        );

        if accepted {
            assert!(registration.is_ok());
            assert!(profile_update.is_ok());
        } else {
            let expected = Error::field("username", "Username must be 2-25 characters long");
            assert_eq!(registration.unwrap_err(), expected);
            assert_eq!(profile_update.unwrap_err(), expected);
        }
    }

    #[test]
    fn test_registration_reports_every_invalid_field() {
        let error = register(json!({
            "username": "9lives",
            "email": "nope",
            "password": "short",
        }))
        .unwrap_err();
        assert_eq!(
            error.field_errors().fields(),
            vec!["email", "password", "username"]
        );
    }

    #[test]
    fn test_registration_missing_password_is_body_error() {
        let error = parse_str::<UserBody>(
            r#"{"username": "mister_business", "email": "a@example.com"}"#,
            &SchemaConfig::default(),
        )
        .unwrap_err();
        assert_eq!(error.field_errors().fields(), vec![BODY_FIELD]);
        assert!(error.to_string().contains("password"));
    }

    #[rstest]
    #[case(json!({"email": "a@example.com"}))]
    #[case(json!({
        "email": "a@example.com",
        "username": null,
        "password": null,
        "phoneNumber": null,
    }))]
    #[case(json!({"email": "a@example.com", "username": ""}))]
    fn test_update_requires_one_field(#[case] body: Value) {
        let error = update(body, &SchemaConfig::default()).unwrap_err();
        assert_eq!(error, Error::field(BODY_FIELD, AT_LEAST_ONE_FIELD_MESSAGE));
    }

    #[rstest]
    #[case(json!({"email": "a@example.com", "username": "mister_business"}))]
    #[case(json!({"email": "a@example.com", "password": "Business1!"}))]
    #[case(json!({"email": "a@example.com", "phoneNumber": "+380999999999"}))]
    fn test_update_accepts_single_field(#[case] body: Value) {
        assert!(update(body, &SchemaConfig::default()).is_ok());
    }

    #[test]
    fn test_update_checks_email_even_with_changes() {
        let error = update(
            json!({"email": "not-an-email", "username": "mister_business"}),
            &SchemaConfig::default(),
        )
        .unwrap_err();
        assert_eq!(error.field_errors().fields(), vec!["email"]);
    }

    #[test]
    fn test_update_applies_rules_to_present_fields() {
        let error = update(
            json!({"email": "a@example.com", "username": "bad_", "password": "weak"}),
            &SchemaConfig::default(),
        )
        .unwrap_err();
        let errors = error.field_errors();
        assert_eq!(errors.fields(), vec!["password", "username"]);
        assert_eq!(errors.get("username").unwrap().message, USERNAME_MESSAGE);
    }

    #[test]
    fn test_update_normalizes_phone_number() -> eyre::Result<()> {
        let body = update(
            json!({"email": "a@example.com", "phoneNumber": "+380 (99) 999-99-99"}),
            &SchemaConfig::default(),
        )?;
        assert_eq!(body.phone_number.as_deref(), Some("+380999999999"));

        let config = SchemaConfig::with_default_country_code("380")?;
        let body = update(
            json!({"email": "a@example.com", "phoneNumber": "099 999 99 99"}),
            &config,
        )?;
        assert_eq!(body.phone_number.as_deref(), Some("+380999999999"));
        Ok(())
    }

    #[rstest]
    #[case("+38099abc9999", "Phone number contains invalid characters")]
    #[case("+1234", "Phone number must have between 8 and 15 digits")]
    #[case("0999999999", "Phone number must include a country code")]
    fn test_update_rejects_phone_number(#[case] phone_number: &str, #[case] message: &str) {
        let error = update(
            json!({"email": "a@example.com", "phoneNumber": phone_number}),
            &SchemaConfig::default(),
        )
        .unwrap_err();
        assert_eq!(error, Error::field("phoneNumber", message));
    }

    #[test]
    fn test_users_public_keeps_page_order() -> eyre::Result<()> {
        let users: UsersPublic = Paginated::new(
            1,
            20,
            2,
            vec!["alice", "bob"]
                .into_iter()
                .map(|name| UserPublic {
                    user: UserFields {
                        username: name.to_string(),
                        email: format!("{name}@example.com"),
                    },
                    role: Role::User,
                    phone_number: None,
                })
                .collect(),
        );
        let value = serde_json::to_value(&users)?;
        assert_eq!(value["total"], 2);
        assert_eq!(value["data"][0]["username"], "alice");
        assert_eq!(value["data"][1]["username"], "bob");
        Ok(())
    }

    #[test]
    fn test_user_fields_schema_carries_examples() -> eyre::Result<()> {
        let schema = serde_json::to_string(&<UserFields as utoipa::PartialSchema>::schema())?;
        assert!(schema.contains("mister_business@gmail.com"));
        Ok(())
    }
}
