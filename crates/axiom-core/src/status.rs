/// Outcome bucket for a transport status code.
///
/// [`StatusClass::from_code`] is total: every `u16` lands in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200-299: proceed to decoding and proof validation.
    Success,
    /// 401.
    Unauthorized,
    /// 429.
    RateLimited,
    /// Any other 400-499.
    ClientError,
    /// 500-599.
    ServerError,
    /// Everything else (1xx, 3xx, out-of-range codes).
    Unexpected,
}

impl StatusClass {
    /// Classifies a status code.
    pub fn from_code(code: u16) -> Self {
        match code {
            200..=299 => StatusClass::Success,
            401 => StatusClass::Unauthorized,
            429 => StatusClass::RateLimited,
            400..=499 => StatusClass::ClientError,
            500..=599 => StatusClass::ServerError,
            _ => StatusClass::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets() {
        assert_eq!(StatusClass::from_code(200), StatusClass::Success);
        assert_eq!(StatusClass::from_code(204), StatusClass::Success);
        assert_eq!(StatusClass::from_code(299), StatusClass::Success);
        assert_eq!(StatusClass::from_code(401), StatusClass::Unauthorized);
        assert_eq!(StatusClass::from_code(429), StatusClass::RateLimited);
        assert_eq!(StatusClass::from_code(400), StatusClass::ClientError);
        assert_eq!(StatusClass::from_code(403), StatusClass::ClientError);
        assert_eq!(StatusClass::from_code(499), StatusClass::ClientError);
        assert_eq!(StatusClass::from_code(500), StatusClass::ServerError);
        assert_eq!(StatusClass::from_code(503), StatusClass::ServerError);
        assert_eq!(StatusClass::from_code(599), StatusClass::ServerError);
        assert_eq!(StatusClass::from_code(0), StatusClass::Unexpected);
        assert_eq!(StatusClass::from_code(302), StatusClass::Unexpected);
        assert_eq!(StatusClass::from_code(600), StatusClass::Unexpected);
        assert_eq!(StatusClass::from_code(u16::MAX), StatusClass::Unexpected);
    }
}
