/// Router Module Index
///
/// Routing is split by access level so that the authentication and admin layers are
/// applied per module in `create_router`, never per route.

/// Routes accessible to all clients (health, auth, post reads).
pub mod public;

/// Routes protected by the authentication middleware.
pub mod authenticated;

/// Routes additionally restricted to identities holding the user-management capability.
pub mod admin;
