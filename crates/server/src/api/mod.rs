pub(crate) mod routes;
pub(crate) mod server;
mod tests;
