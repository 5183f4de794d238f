//! Well-known role names.

/// Reserved role that holds every privilege without consulting the graph.
pub const SUPERUSER_ROLE: &str = "System Developer";

/// Implicit role of every principal, authenticated or not.
pub const ANONYMOUS_ROLE: &str = "Anonymous";

/// Implicit role of every principal with an authenticated user.
pub const AUTHENTICATED_ROLE: &str = "Authenticated";

/// Role assigned to care providers.
pub const PROVIDER_ROLE: &str = "Provider";
