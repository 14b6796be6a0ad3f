//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for list endpoints.
const DEFAULT_LIMIT: i64 = 20;
/// Hard cap on page size.
const MAX_LIMIT: i64 = 100;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp to sane bounds: limit in `1..=100` (default 20), offset >= 0.
    pub fn clamp(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Query parameter for endpoints that take an optional result cap
/// (`?limit=`), e.g. recent posts.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParam {
    pub limit: Option<i64>,
}

impl LimitParam {
    pub fn clamp_or(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_caps() {
        let (limit, offset) = PaginationParams::default().clamp();
        assert_eq!((limit, offset), (20, 0));

        let params = PaginationParams {
            limit: Some(1000),
            offset: Some(-5),
        };
        assert_eq!(params.clamp(), (100, 0));
    }

    #[test]
    fn limit_param_honors_default() {
        assert_eq!(LimitParam::default().clamp_or(5), 5);
        assert_eq!(LimitParam { limit: Some(3) }.clamp_or(5), 3);
        assert_eq!(LimitParam { limit: Some(0) }.clamp_or(5), 1);
    }
}
