use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Enum, Object, Result as GqlResult, Schema, SimpleObject};
use chrono::NaiveDate;

use crate::adapters::in_memory::in_memory_store::InMemoryTimecardStore;
use crate::application::controller::{DashboardController, DashboardView};
use crate::application::listener::ConnectionState;
use crate::core::stats::AggregateStats;
use crate::core::summary::WeeklySummary;

pub type Controller = DashboardController<InMemoryTimecardStore, InMemoryTimecardStore>;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(rename_items = "lowercase")]
pub enum GqlConnectionState {
    Connected,
    Disconnected,
}

impl From<ConnectionState> for GqlConnectionState {
    fn from(state: ConnectionState) -> Self {
        match state {
            ConnectionState::Connected => Self::Connected,
            ConnectionState::Disconnected => Self::Disconnected,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlWeeklySummary {
    pub employee_id: String,
    pub display_name: String,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub daily_hours: Vec<f64>,
    pub total: f64,
}

impl From<WeeklySummary> for GqlWeeklySummary {
    fn from(summary: WeeklySummary) -> Self {
        Self {
            employee_id: summary.employee.employee_id,
            display_name: summary.employee.display_name,
            designation: summary.employee.designation,
            department: summary.employee.department,
            daily_hours: summary.daily_hours.to_vec(),
            total: summary.total,
        }
    }
}

#[derive(SimpleObject, Clone, Copy)]
pub struct GqlAggregateStats {
    pub total_hours: f64,
    pub active_count: i64,
    pub included_count: i64,
    pub avg_hours: f64,
}

impl From<AggregateStats> for GqlAggregateStats {
    fn from(stats: AggregateStats) -> Self {
        Self {
            total_hours: stats.total_hours,
            active_count: stats.active_count as i64,
            included_count: stats.included_count as i64,
            avg_hours: stats.avg_hours,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlDashboardView {
    pub week_start: NaiveDate,
    pub week_end_exclusive: NaiveDate,
    pub employee_filter: Option<String>,
    pub summaries: Vec<GqlWeeklySummary>,
    pub stats: GqlAggregateStats,
    pub loading: bool,
    pub error: Option<String>,
    pub connection_state: GqlConnectionState,
}

impl From<DashboardView> for GqlDashboardView {
    fn from(view: DashboardView) -> Self {
        Self {
            week_start: view.week_start,
            week_end_exclusive: view.week_end_exclusive,
            employee_filter: view.employee_filter,
            summaries: view.summaries.into_iter().map(Into::into).collect(),
            stats: view.stats.into(),
            loading: view.loading,
            error: view.error,
            connection_state: view.connection_state.into(),
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn timecard_week(&self, context: &Context<'_>) -> GqlResult<GqlDashboardView> {
        let state = context.data_unchecked::<AppState>();
        Ok(state.controller.snapshot().await.into())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn set_week(
        &self,
        context: &Context<'_>,
        date: NaiveDate,
    ) -> GqlResult<GqlDashboardView> {
        let state = context.data_unchecked::<AppState>();
        state.controller.set_week(date).await;
        Ok(state.controller.snapshot().await.into())
    }

    async fn navigate_week(
        &self,
        context: &Context<'_>,
        delta: i64,
    ) -> GqlResult<GqlDashboardView> {
        let state = context.data_unchecked::<AppState>();
        state.controller.navigate_week(delta).await;
        Ok(state.controller.snapshot().await.into())
    }

    async fn set_employee_filter(
        &self,
        context: &Context<'_>,
        employee_id: Option<String>,
    ) -> GqlResult<GqlDashboardView> {
        let state = context.data_unchecked::<AppState>();
        state.controller.set_employee_filter(employee_id).await;
        Ok(state.controller.snapshot().await.into())
    }

    /// Explicit retry after a failed fetch.
    async fn refresh_week(&self, context: &Context<'_>) -> GqlResult<GqlDashboardView> {
        let state = context.data_unchecked::<AppState>();
        state.controller.refresh().await;
        Ok(state.controller.snapshot().await.into())
    }
}

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(controller: Arc<Controller>) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(AppState { controller })
        .finish()
}
