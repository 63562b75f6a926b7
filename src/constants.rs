/// Constants module to avoid magic strings in the codebase

// Network Configuration
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Environment
pub const ENV_PREFIX: &str = "DOMU_";
pub const CONFIG_DIR_NAME: &str = "domu";
pub const LOCAL_CONFIG_PATH: &str = ".domu/config.toml";
pub const SESSION_FILE_NAME: &str = "session.toml";

// User-facing messages returned by the API layer
pub const NETWORK_ERROR_MESSAGE: &str = "No se pudo conectar al servidor.";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Respuesta inválida del servidor.";
pub const CANCELLED_MESSAGE: &str = "Solicitud cancelada.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Credenciales inválidas o error de servidor.";
pub const USER_SEARCH_ERROR_MESSAGE: &str = "Error al buscar usuarios";

pub const REGISTER_SUCCESS_MESSAGE: &str = "Registro exitoso";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Inicio de sesión exitoso";
pub const PROFILE_UPDATED_MESSAGE: &str = "Usuario actualizado correctamente.";
pub const PROPERTY_DELETED_MESSAGE: &str = "Eliminada";
pub const CONTRACT_CANCELLED_MESSAGE: &str = "Contrato cancelado";

// Form validation
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const DEFAULT_CONTRACT_MONTHS: u32 = 12;
