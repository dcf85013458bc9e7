use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, Router, routing::get};
use chrono::Local;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use timecards::adapters::in_memory::in_memory_feed::InMemoryChangeFeed;
use timecards::adapters::in_memory::in_memory_store::InMemoryTimecardStore;
use timecards::adapters::inbound::graphql::{AppSchema, build_schema};
use timecards::application::controller::DashboardController;
use timecards::application::listener::FeedListener;
use timecards::core::week::Week;

const FEED_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // In-memory deps for now
    let store = Arc::new(InMemoryTimecardStore::new());
    let feed = Arc::new(InMemoryChangeFeed::new());

    let controller = Arc::new(DashboardController::new(
        store.clone(),
        store.clone(),
        Week::containing(Local::now().date_naive()),
    ));
    controller.refresh().await;

    let listener = Arc::new(FeedListener::new(feed.clone()));
    {
        let listener = listener.clone();
        let controller = controller.clone();
        tokio::spawn(async move {
            loop {
                if let Err(error) = listener.run(controller.as_ref()).await {
                    tracing::warn!(%error, "change feed dropped, re-subscribing shortly");
                }
                tokio::time::sleep(FEED_RETRY_DELAY).await;
            }
        });
    }

    let schema = build_schema(controller);

    let app = Router::new()
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = "0.0.0.0:8080".parse()?;
    tracing::info!("GraphQL endpoint: http://{}/gql", addr);
    let tcp = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(tcp, app).await?;
    Ok(())
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> axum::response::Html<String> {
    use async_graphql::http::GraphiQLSource;
    axum::response::Html(GraphiQLSource::build().endpoint("/gql").finish())
}
