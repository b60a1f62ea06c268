use std::borrow::Cow;

/// Errors raised while assembling or running the client.
#[resbook_derive::resbook_error]
pub enum ClientError {
    #[error("Configuration failure{}: {source}", format_context(.context))]
    Config { source: resbook_kernel::config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Storage failure{}: {source}", format_context(.context))]
    Storage { source: resbook_storage::StorageError, context: Option<Cow<'static, str>> },

    #[error("Gateway failure{}: {source}", format_context(.context))]
    Gateway { source: resbook_gateway::GatewayError, context: Option<Cow<'static, str>> },

    #[error("Identity failure{}: {source}", format_context(.context))]
    Identity { source: resbook_identity::IdentityError, context: Option<Cow<'static, str>> },

    #[error("Logging setup failure{}: {source}", format_context(.context))]
    Logger { source: resbook_logger::LoggerError, context: Option<Cow<'static, str>> },

    #[error("Internal client error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
