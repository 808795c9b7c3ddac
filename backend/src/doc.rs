//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the users and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`], so domain types
//! stay free of utoipa derives. The document backs Swagger UI in debug
//! builds and is printed by the `openapi-dump` binary.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};
use crate::inbound::http::users::{AddUserRequest, UserCreatedResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "List and register users stored in PostgreSQL."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::add_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        AddUserRequest,
        UserCreatedResponse
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
