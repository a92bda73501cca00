use crate::error::{CoreError, Result as CoreResult};
use crate::paging::PagingParams;
use crate::params;

use uuid::Uuid;

/// Typed view of the query parameters of one work item listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemListContext {
    pub space_id: Uuid,
    pub filter: Option<String>,
    pub expression: Option<String>,
    pub assignee: Option<String>,
    /// Kept raw, the filter builder parses it
    pub iteration: Option<String>,
    pub work_item_type: Option<Uuid>,
    pub area: Option<String>,
    pub state: Option<String>,
    pub parent_exists: Option<bool>,
    pub paging: PagingParams,
}

impl WorkItemListContext {
    pub fn builder() -> WorkItemListContextBuilder {
        WorkItemListContextBuilder::default()
    }

    /// Context scoped to `space_id` with no filters and default paging.
    pub fn for_space(space_id: Uuid) -> Self {
        Self {
            space_id,
            filter: None,
            expression: None,
            assignee: None,
            iteration: None,
            work_item_type: None,
            area: None,
            state: None,
            parent_exists: None,
            paging: PagingParams::default(),
        }
    }
}

/// Accumulates query parameters into a [`WorkItemListContext`].
///
/// The first occurrence of each name wins; later duplicates and empty values
/// are ignored. Unrecognized names are ignored.
#[derive(Debug, Clone, Default)]
pub struct WorkItemListContextBuilder {
    path_space_id: Option<String>,
    query_space_id: Option<String>,
    filter: Option<String>,
    expression: Option<String>,
    assignee: Option<String>,
    iteration: Option<String>,
    work_item_type: Option<String>,
    area: Option<String>,
    state: Option<String>,
    parent_exists: Option<String>,
    paging: PagingParams,
}

impl WorkItemListContextBuilder {
    /// Space id taken from the route. Takes precedence over `spacesID`.
    pub fn space_id(mut self, raw: impl Into<String>) -> Self {
        self.path_space_id = Some(raw.into());
        self
    }

    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.accept(name, value);
        self
    }

    pub fn params<'a, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in pairs {
            self.accept(name, value);
        }
        self
    }

    fn accept(&mut self, name: &str, value: &str) {
        if self.paging.accept(name, value) {
            return;
        }
        let slot = match name {
            params::SPACE => &mut self.query_space_id,
            params::FILTER => &mut self.filter,
            params::FILTER_EXPRESSION => &mut self.expression,
            params::FILTER_ASSIGNEE => &mut self.assignee,
            params::FILTER_ITERATION => &mut self.iteration,
            params::FILTER_WORK_ITEM_TYPE => &mut self.work_item_type,
            params::FILTER_AREA => &mut self.area,
            params::FILTER_WORK_ITEM_STATE => &mut self.state,
            params::FILTER_PARENT_EXISTS => &mut self.parent_exists,
            _ => return,
        };
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value.to_string());
        }
    }

    pub fn build(self) -> CoreResult<WorkItemListContext> {
        let raw_space = self
            .path_space_id
            .filter(|s| !s.is_empty())
            .or(self.query_space_id)
            .ok_or_else(|| CoreError::bad_parameter(params::SPACE, "space id is required"))?;
        let space_id = parse_uuid(params::SPACE, &raw_space)?;

        let work_item_type = self
            .work_item_type
            .as_deref()
            .map(|t| parse_uuid(params::FILTER_WORK_ITEM_TYPE, t))
            .transpose()?;

        let parent_exists = self
            .parent_exists
            .as_deref()
            .map(|p| parse_bool(params::FILTER_PARENT_EXISTS, p))
            .transpose()?;

        Ok(WorkItemListContext {
            space_id,
            filter: self.filter,
            expression: self.expression,
            assignee: self.assignee,
            iteration: self.iteration,
            work_item_type,
            area: self.area,
            state: self.state,
            parent_exists,
            paging: self.paging,
        })
    }
}

#[track_caller]
pub(crate) fn parse_uuid(parameter: &str, value: &str) -> CoreResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        CoreError::bad_parameter(
            parameter,
            format!("{parameter} is not a valid UUID '{value}': {e}"),
        )
    })
}

/// `1`, `t`, `true` and `0`, `f`, `false`, in lower, upper or title case.
fn parse_bool(parameter: &str, value: &str) -> CoreResult<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(CoreError::bad_parameter(
            parameter,
            format!("{parameter} must be a boolean, got '{other}'"),
        )),
    }
}
