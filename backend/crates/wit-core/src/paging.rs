//! Paging parameter normalization.
//!
//! Two addressing conventions are accepted. When `page[size]` is supplied the
//! request is in page-number/page-size mode, otherwise in offset/limit mode.
//! Both end in the same canonical [`Page`].

use crate::error::{CoreError, Result as CoreResult};
use crate::params;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u64 = 20;
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Page-size bounds applied by the normalizer and the link calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl PageLimits {
    /// Fails unless `1 <= default_limit <= max_limit`.
    pub fn new(default_limit: u64, max_limit: u64) -> CoreResult<Self> {
        if default_limit == 0 || default_limit > max_limit {
            return Err(CoreError::bad_input(format!(
                "page limits must satisfy 1 <= default ({default_limit}) <= max ({max_limit})"
            )));
        }
        Ok(Self {
            default_limit,
            max_limit,
        })
    }

    pub fn clamp_limit(&self, limit: Option<i64>) -> u64 {
        match limit {
            Some(l) if l > 0 => (l as u64).min(self.max_limit),
            _ => self.default_limit,
        }
    }
}

/// Canonical page: `offset >= 0` and `1 <= limit <= max_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    offset: u64,
    limit: u64,
}

impl Page {
    /// Clamp raw integers into a valid page.
    pub fn clamped(offset: i64, limit: Option<i64>, limits: &PageLimits) -> Self {
        Self {
            offset: offset.max(0) as u64,
            limit: limits.clamp_limit(limit),
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

/// Raw paging values as they appeared on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagingParams {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub number: Option<String>,
    pub size: Option<String>,
}

impl PagingParams {
    /// Collect the paging values from query pairs. The first occurrence of a
    /// name wins and empty values count as absent.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut paging = Self::default();
        for (name, value) in pairs {
            paging.accept(name, value);
        }
        paging
    }

    /// Record one query pair. Returns `true` if `name` is a paging parameter.
    pub fn accept(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            params::PAGE_OFFSET => &mut self.offset,
            params::PAGE_LIMIT => &mut self.limit,
            params::PAGE_NUMBER => &mut self.number,
            params::PAGE_SIZE => &mut self.size,
            _ => return false,
        };
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value.to_string());
        }
        true
    }
}

/// Turns raw paging parameters into a [`Page`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PagingNormalizer {
    limits: PageLimits,
}

impl PagingNormalizer {
    pub fn new(limits: PageLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    pub fn normalize(&self, raw: &PagingParams) -> CoreResult<Page> {
        match raw.size.as_deref() {
            Some(size) => {
                let size = parse_integer(params::PAGE_SIZE, size)?;
                // page[number] is taken as the raw offset, not scaled by size
                let offset = raw
                    .number
                    .as_deref()
                    .and_then(|n| n.parse::<i64>().ok())
                    .unwrap_or(0);
                Ok(Page::clamped(offset, Some(size), &self.limits))
            }
            None => {
                let offset = raw
                    .offset
                    .as_deref()
                    .map(|o| parse_integer(params::PAGE_OFFSET, o))
                    .transpose()?
                    .unwrap_or(0);
                let limit = raw
                    .limit
                    .as_deref()
                    .map(|l| parse_integer(params::PAGE_LIMIT, l))
                    .transpose()?;
                Ok(Page::clamped(offset, limit, &self.limits))
            }
        }
    }
}

fn parse_integer(parameter: &str, value: &str) -> CoreResult<i64> {
    value.parse::<i64>().map_err(|e| {
        CoreError::bad_parameter(
            parameter,
            format!("{parameter} must be an integer, got '{value}': {e}"),
        )
    })
}
