//! # Constants
//!
//! Shared constants used throughout the function.
//!
//! Response strings are part of the HTTP contract consumed by dashboards and
//! smoke tests, so they must not be reworded.

/// Environment variable holding the Key Vault endpoint URL
pub const KEY_VAULT_URL_ENV: &str = "KEY_VAULT_URL";

/// Environment variable selecting the user-assigned managed identity
pub const AZURE_CLIENT_ID_ENV: &str = "AZURE_CLIENT_ID";

/// Port the Functions host assigns to a custom handler
pub const FUNCTIONS_CUSTOMHANDLER_PORT_ENV: &str = "FUNCTIONS_CUSTOMHANDLER_PORT";

/// Default HTTP port when neither the Functions host nor `PORT` provide one
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Function name, also the route segment under `/api`
pub const FUNCTION_NAME: &str = "getKeyVaultSecret";

/// Secret provisioned next to the vault by the infrastructure template
pub const DEMO_SECRET_NAME: &str = "demo-secret";

/// Header carrying the invocation id forwarded by the Functions host
pub const INVOCATION_ID_HEADER: &str = "x-azure-functions-invocationid";

/// OAuth scope requested for Key Vault data-plane calls
pub const KEY_VAULT_SCOPE: &str = "https://vault.azure.net/.default";

pub const MISSING_URL_ERROR: &str = "KEY_VAULT_URL environment variable not found";
pub const MISSING_URL_MESSAGE: &str =
    "Ensure the Function App is properly configured with Key Vault URL";

pub const SECRET_EMPTY_ERROR: &str = "Secret not found or empty";

pub const SUCCESS_MESSAGE: &str = "Successfully accessed Key Vault via private endpoint!";
pub const CONNECTION_METHOD: &str = "Private Endpoint";
pub const AUTHENTICATION_METHOD: &str = "User Assigned Managed Identity";

/// Remediation checklist attached to every failure response, in display order
pub const TROUBLESHOOTING_CHECK_ITEMS: [&str; 5] = [
    "Verify Function App has VNet integration enabled",
    "Confirm Key Vault private endpoint is properly configured",
    "Check managed identity has Key Vault Secrets User role",
    "Verify private DNS zone is linked to VNet",
    "Ensure Key Vault public access is disabled",
];
