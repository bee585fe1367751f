use stock_correlation::{RawCorrelationPayload, assemble_matrix};
use tracing::{error, info};

const SAMPLE_PAYLOAD: &str = r#"{
    "AAPL": [1.0, 0.82, 0.41, -0.12],
    "MSFT": [0.82, 1.0, 0.37, -0.05],
    "TSLA": [0.41, 0.37, 1.0, -0.74],
    "XOM": [-0.12, -0.05, -0.74, 1.0]
}"#;

// Reads a correlation payload from the file given as the first argument (or a built-in sample),
// then logs every cell with its band.
fn main() {
    // Initialise INFO Tracing log subscriber
    init_logging();

    let json = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(error) => {
                error!(%path, %error, "failed to read correlation payload");
                return;
            }
        },
        None => SAMPLE_PAYLOAD.to_string(),
    };

    let assembled =
        RawCorrelationPayload::from_json(&json).and_then(|payload| assemble_matrix(&payload));

    let matrix = match assembled {
        Ok(matrix) => matrix,
        Err(error) => {
            error!(%error, "failed to assemble correlation matrix");
            return;
        }
    };

    let labels: Vec<&str> = matrix.labels().collect();
    let heatmap = matrix.classify();

    for row in heatmap.rows() {
        for (column, cell) in row.cells.iter().enumerate() {
            let column_label = labels.get(column).copied().unwrap_or("?");
            info!("{} / {}: {} ({})", row.label, column_label, cell, cell.band);
        }
    }
}

// Initialise an INFO `Subscriber` for `Tracing` logs and install it as the global default.
fn init_logging() {
    tracing_subscriber::fmt()
        // Filter messages based on the INFO
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        // Disable colours on release builds
        .with_ansi(cfg!(debug_assertions))
        // Use compact formatting for one line per cell
        .compact()
        // Install this Tracing subscriber as global default
        .init()
}
