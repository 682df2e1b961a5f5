use std::cell::RefCell;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use tokio::io::AsyncReadExt;
use tokio::time::Instant;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::build_graph;
use crate::config::Config;
use crate::config::load_config_or_default;
use crate::err_with_loc;
use crate::error::Context;
use crate::error::Result;
use crate::handler::ShutdownSignal;
use crate::ingest::parse_address_json;
use crate::ingest::parse_transaction_json;
use crate::layout::EngineState;
use crate::layout::LayoutEngine;
use crate::layout::SvgSurface;
use crate::model::AddressView;
use crate::model::GraphModel;
use crate::setup_tracing;

const ENGINE_NAME: &str = "flowgraph";
const STDIN_INPUT: &str = "-";

#[derive(Debug, Clone, Parser)]
#[command(name = "flowgraph", version, about = "Lay out the fund flow around an address or transaction")]
pub struct RunnerArgs {
    /// Raw ledger JSON, or `-` for stdin
    #[arg(short, long, default_value = STDIN_INPUT)]
    pub input: String,

    /// Treat the input as an address record for this address
    #[arg(short, long, conflicts_with = "transaction")]
    pub address: Option<String>,

    /// Treat the input as a single transaction record
    #[arg(short, long)]
    pub transaction: bool,

    #[arg(short, long, default_value = "Config.toml")]
    pub config: PathBuf,

    /// Where the settled frame is written
    #[arg(long, default_value = "flowgraph.svg")]
    pub svg: PathBuf,

    /// Also write the graph as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub nodes: usize,
    pub links: usize,
    pub frames: usize,
    pub settled: bool,
    pub svg_written: bool,
}

pub struct Runner {
    pub config: Config,
    pub args: RunnerArgs,
    pub shutdown: ShutdownSignal,
}

impl Runner {
    pub fn new(
        config: Config,
        args: RunnerArgs,
    ) -> Self {
        Self {
            config,
            args,
            shutdown: ShutdownSignal::new(),
        }
    }

    /// Entry point of the `flowgraph` binary.
    pub async fn run(args: RunnerArgs) -> Result<()> {
        let config = load_config_or_default(&args.config)?;

        setup_tracing(ENGINE_NAME, &config.logging)?;
        info!("flowgraph::run::setup_tracing");

        let runner = Runner::new(config, args);

        let ctrl_c_signal = runner.shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("termination_signal::graceful_shutdown");
                ctrl_c_signal.shutdown();
            }
        });

        let report = runner.execute().await?;
        info!(
            "flowgraph::run::done::nodes::{}::links::{}::frames::{}::settled::{}",
            report.nodes, report.links, report.frames, report.settled
        );
        Ok(())
    }

    /// Ingest, build, lay out and write outputs. Stops early when the shutdown signal fires.
    pub async fn execute(&self) -> Result<RunReport> {
        let json = self.read_input().await?;
        let view = self.ingest(&json)?;
        let (mut total_in, mut total_out, mut fees) = (0.0, 0.0, 0.0);
        for tx in &view.transactions {
            debug!(
                "flowgraph::ingest::tx::{}::in::{:.8}::out::{:.8}::fee::{:.8}",
                tx.hash,
                tx.total_input(),
                tx.total_output(),
                tx.fee()
            );
            total_in += tx.total_input();
            total_out += tx.total_output();
            fees += tx.fee();
        }
        info!(
            "flowgraph::ingest::address::{}::transactions::{}::in::{:.8}::out::{:.8}::fees::{:.8}",
            view.address,
            view.transactions.len(),
            total_in,
            total_out,
            fees
        );

        let graph = build_graph(&view);
        let summary = graph.summary();
        info!(
            "flowgraph::graph::sources::{}::sinks::{}::links::{}::total_value::{:.8}",
            summary.sources, summary.sinks, summary.links, summary.total_value
        );

        if let Some(path) = &self.args.json {
            write_graph_json(path, &graph).await?;
        }

        let (nodes, links) = (graph.node_count(), graph.link_count());
        let (frames, settled, document) = self.lay_out(graph).await;

        let svg_written = match document {
            Some(document) => {
                tokio::fs::write(&self.args.svg, document)
                    .await
                    .with_context(|| format!("failed to write {}", self.args.svg.display()))?;
                info!("flowgraph::svg::written::{}", self.args.svg.display());
                true
            },
            None => {
                warn!("flowgraph::svg::nothing_rendered");
                false
            },
        };

        Ok(RunReport {
            nodes,
            links,
            frames,
            settled,
            svg_written,
        })
    }

    async fn read_input(&self) -> Result<String> {
        let mut json = String::new();
        if self.args.input == STDIN_INPUT {
            tokio::io::stdin().read_to_string(&mut json).await.context("failed to read stdin")?;
        } else {
            json = tokio::fs::read_to_string(&self.args.input)
                .await
                .with_context(|| format!("failed to read {}", self.args.input))?;
        }
        Ok(json)
    }

    fn ingest(
        &self,
        json: &str,
    ) -> Result<AddressView> {
        let view = if self.args.transaction {
            parse_transaction_json(json)
        } else {
            parse_address_json(json, self.args.address.as_deref())
        };
        view.map_err(|e| err_with_loc!(e))
    }

    /// Drive the layout engine on a frame clock until it settles or shutdown is
    /// requested. Returns frames advanced, whether it settled, and the last frame.
    async fn lay_out(
        &self,
        graph: GraphModel,
    ) -> (usize, bool, Option<String>) {
        let view = &self.config.view;
        let surface = Rc::new(RefCell::new(SvgSurface::new(view.width, view.height)));
        let mut engine = LayoutEngine::new(&surface, self.config.layout.clone(), view.clone());
        engine.load(graph, None);

        let period = self.config.layout.tick_interval().max(Duration::from_millis(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut frames = 0;
        let mut last = Instant::now();
        while engine.is_active() {
            tokio::select! {
                biased;
                _ = self.shutdown.wait_for_shutdown() => {
                    info!("flowgraph::layout::interrupted::frames::{}", frames);
                    break;
                },
                _ = interval.tick() => {
                    let now = Instant::now();
                    engine.advance(now - last);
                    last = now;
                    frames += 1;
                },
            }
        }

        let settled = engine.state() == EngineState::Settled;
        let document = surface.borrow().document().to_string();
        engine.teardown();

        (frames, settled, (!document.is_empty()).then_some(document))
    }
}

async fn write_graph_json(
    path: &Path,
    graph: &GraphModel,
) -> Result<()> {
    let json = serde_json::to_string_pretty(graph).context("failed to serialize graph")?;
    tokio::fs::write(path, json).await.with_context(|| format!("failed to write {}", path.display()))?;
    info!("flowgraph::json::written::{}", path.display());
    Ok(())
}
