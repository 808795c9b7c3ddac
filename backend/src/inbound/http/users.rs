//! Users API handlers.
//!
//! ```text
//! GET /api/users
//! POST /api/users {"username":"alice","email":"a@x.com"}
//! ```

use std::fmt;

use actix_web::{HttpResponse, get, post, web};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Error, NewUser, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field, user_validation_error};

/// Confirmation message returned by `POST /api/users`.
pub const USER_ADDED_MESSAGE: &str = "User added";

/// Request body for `POST /api/users`.
///
/// Both fields are optional at the wire level so a missing field yields a
/// `missing_field` error rather than a generic parse failure. Unknown fields
/// are ignored. Only a JSON object is accepted; positional arrays are
/// rejected.
#[derive(Debug, Default, Serialize, utoipa::ToSchema)]
pub struct AddUserRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
}

impl<'de> Deserialize<'de> for AddUserRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AddUserRequestVisitor)
    }
}

struct AddUserRequestVisitor;

impl<'de> Visitor<'de> for AddUserRequestVisitor {
    type Value = AddUserRequest;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object with username and email")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = AddUserRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "username" => {
                    if request.username.is_some() {
                        return Err(de::Error::duplicate_field("username"));
                    }
                    request.username = map.next_value()?;
                }
                "email" => {
                    if request.email.is_some() {
                        return Err(de::Error::duplicate_field("email"));
                    }
                    request.email = map.next_value()?;
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(request)
    }
}

impl TryFrom<AddUserRequest> for NewUser {
    type Error = Error;

    fn try_from(value: AddUserRequest) -> Result<Self, Self::Error> {
        let username = require_field(value.username, FieldName::new("username"))?;
        let email = require_field(value.email, FieldName::new("email"))?;
        NewUser::try_from_strings(username, email).map_err(user_validation_error)
    }
}

/// Response body for a successful `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserCreatedResponse {
    /// Identifier assigned to the new user.
    #[schema(value_type = i64, example = 1)]
    pub id: UserId,
    #[schema(example = "User added")]
    pub message: String,
}

/// List every stored user in ascending identifier order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Create a user and return its assigned identifier.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = AddUserRequest,
    responses(
        (status = 201, description = "User created", body = UserCreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username or email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "addUser"
)]
#[post("/users")]
pub async fn add_user(
    state: web::Data<HttpState>,
    payload: web::Json<AddUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::try_from(payload.into_inner())?;
    let user = state.users_command.add_user(new_user).await?;
    Ok(HttpResponse::Created().json(UserCreatedResponse {
        id: user.id(),
        message: USER_ADDED_MESSAGE.to_owned(),
    }))
}
