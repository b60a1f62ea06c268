use std::borrow::Cow;

/// Error types specific to the booking feature.
#[resbook_derive::resbook_error]
pub enum BookingError {
    #[error("Invalid date{}: {message}", format_context(.context))]
    InvalidDate { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid reservation period{}: {message}", format_context(.context))]
    InvalidPeriod { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Request failed{}: {source}", format_context(.context))]
    Gateway { source: resbook_gateway::GatewayError, context: Option<Cow<'static, str>> },

    #[error("Internal booking error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
