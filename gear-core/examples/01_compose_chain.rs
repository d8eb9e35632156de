//! Compose a chain of three buffers `i -> o -> o' -> o''`.
//!
//! Run with: `RUST_LOG=gear_core=debug cargo run --example 01_compose_chain`

use gear_core::{IoContract, Result, TermSet, parse_terms, var_set};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn buffer(input: &str, output: &str, bound: &str) -> Result<IoContract> {
    IoContract::new(
        parse_terms([format!("{input} <= {bound}")])?,
        parse_terms([format!("{output} = {input}")])?,
        var_set([input]),
        var_set([output]),
    )
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let reduced: TermSet = parse_terms(["a <= 5", "a <= 6"])?.simplify(None)?;
    println!("a <= 5, a <= 6 reduces to {}", reduced);

    let cont = buffer("i", "o", "2")?;
    let contp = buffer("o", "o'", "1")?;
    let contpp = buffer("o'", "o''", "0")?;

    println!("Contract is\n{}", cont);
    println!("Contract' is\n{}", contp);
    println!("Contract'' is\n{}", contpp);

    let head = cont.compose(&contp)?;
    println!("Contract . Contract' is\n{}", head);

    let tail = contp.compose(&contpp)?;
    println!("Contract' . Contract'' is\n{}", tail);

    let chain = cont.compose(&tail)?;
    println!("Contract . (Contract' . Contract'') is\n{}", chain);

    match head.compose(&contpp) {
        Ok(c) => println!("(Contract . Contract') . Contract'' is\n{}", c),
        Err(e) => println!("(Contract . Contract') . Contract'' failed: {}", e),
    }

    println!("chain refines Contract: {}", chain.refines(&cont)?);
    Ok(())
}
