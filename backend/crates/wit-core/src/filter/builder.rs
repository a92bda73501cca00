use crate::criteria::{Expression, Literal, fields};
use crate::error::Result as CoreResult;
use crate::filter::context::{WorkItemListContext, parse_uuid};
use crate::filter::{search_expression, simple_query};
use crate::listing::IterationHierarchy;
use crate::params;
use crate::sticky::StickyFragments;

use log::debug;

/// A filter ready for the store, plus the fragments that reproduce it on a
/// navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltFilter {
    pub expression: Expression,
    pub sticky: StickyFragments,
}

/// Builds the criteria expression for a work item listing request.
///
/// The result is always rooted in an equality on the requested space, and
/// every further predicate is and-combined with it, so no filter can widen
/// the listing beyond that space.
pub struct FilterBuilder<'a> {
    hierarchy: &'a dyn IterationHierarchy,
}

impl<'a> FilterBuilder<'a> {
    pub fn new(hierarchy: &'a dyn IterationHierarchy) -> Self {
        Self { hierarchy }
    }

    pub async fn build(&self, context: &WorkItemListContext) -> CoreResult<BuiltFilter> {
        let mut sticky = StickyFragments::new();

        let mut root = Expression::equals(fields::SPACE, context.space_id);

        if let Some(filter) = &context.filter {
            if let Some(parsed) = simple_query::parse(filter)? {
                root = root.and(parsed);
            }
            sticky.push(params::FILTER, filter);
        }

        if let Some(expression) = &context.expression {
            root = root.and(search_expression::parse(expression)?);
            sticky.push(params::FILTER_EXPRESSION, expression);
        }

        if let Some(assignee) = &context.assignee {
            let predicate = if assignee == params::ASSIGNEE_NONE {
                Expression::is_null(fields::ASSIGNEES)
            } else {
                Expression::equals(fields::ASSIGNEES, Literal::sequence([assignee.as_str()]))
            };
            root = root.and(predicate);
            sticky.push(params::FILTER_ASSIGNEE, assignee);
        }

        if let Some(iteration) = &context.iteration {
            root = root.and(self.iteration_group(iteration, &mut sticky).await?);
        }

        if let Some(work_item_type) = context.work_item_type {
            root = root.and(Expression::equals(
                fields::TYPE,
                Literal::sequence([work_item_type]),
            ));
            sticky.push(params::FILTER_WORK_ITEM_TYPE, &work_item_type.to_string());
        }

        if let Some(area) = &context.area {
            root = root.and(Expression::equals(fields::AREA, area.as_str()));
            sticky.push(params::FILTER_AREA, area);
        }

        if let Some(state) = &context.state {
            root = root.and(Expression::equals(fields::STATE, state.as_str()));
            sticky.push(params::FILTER_WORK_ITEM_STATE, state);
        }

        // Applied by the store, only carried on the links here
        if let Some(parent_exists) = context.parent_exists {
            sticky.push(params::FILTER_PARENT_EXISTS, &parent_exists.to_string());
        }

        debug!("Built work item filter: {root}");

        Ok(BuiltFilter {
            expression: root,
            sticky,
        })
    }

    /// `iteration = I OR iteration = D1 OR ...` over the iteration and all of
    /// its descendants.
    async fn iteration_group(
        &self,
        raw: &str,
        sticky: &mut StickyFragments,
    ) -> CoreResult<Expression> {
        let iteration_id = parse_uuid(params::FILTER_ITERATION, raw)?;
        let descendants = self.hierarchy.load_descendants(iteration_id).await?;

        let ids: Vec<_> = std::iter::once(iteration_id).chain(descendants).collect();
        for id in &ids {
            sticky.push(params::FILTER_ITERATION, &id.to_string());
        }

        let group = Expression::any(
            ids.into_iter()
                .map(|id| Expression::equals(fields::ITERATION, id)),
        );
        Ok(group.unwrap_or_else(|| Expression::equals(fields::ITERATION, iteration_id)))
    }
}
