/// Latency and uptime check.
pub mod ping;
/// Information about the current guild.
pub mod serverinfo;
/// Information about a user, including game records.
pub mod userinfo;
