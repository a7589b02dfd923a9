pub mod rate_limit_middleware;
pub mod sanitize_middleware;
pub mod security_headers_middleware;

pub use rate_limit_middleware::RateLimiter;
pub use sanitize_middleware::SanitizeRequest;
pub use security_headers_middleware::SecurityHeaders;
