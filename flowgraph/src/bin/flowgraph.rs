// ─────────────────────────────────────────────────────────────────────────────
//  Flowgraph: fund flow layout runner
//
//  Reads a raw ledger record (address or single transaction), builds the
//  address graph around it, settles the force-directed layout and writes the
//  final frame as SVG.
// ─────────────────────────────────────────────────────────────────────────────
use clap::Parser;
use flowgraph::engine::Runner;
use flowgraph::engine::RunnerArgs;
use flowgraph::error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = RunnerArgs::parse();
    Runner::run(args).await?;
    Ok(())
}
