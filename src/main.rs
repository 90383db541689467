use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use clap::{App, Arg};
use tracing_subscriber::EnvFilter;

use pyvax::compile::{compile_result, Optimizer, Solc};

fn main() -> Result<()> {
    let matches = App::new("pyvax")
        .version(env!("CARGO_PKG_VERSION"))
        .author("PyVax")
        .about("Converts Python-dialect smart contracts to Solidity")
        .arg(
            Arg::with_name("INPUT")
                .help("Input Python contract file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("DIR")
                .help("Output directory for Solidity files")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .help("Print the transpile result as JSON instead of writing files"),
        )
        .arg(
            Arg::with_name("compile")
                .long("compile")
                .help("Compile the generated Solidity with solc"),
        )
        .arg(
            Arg::with_name("solc")
                .long("solc")
                .value_name("PATH")
                .help("Path to the solc binary")
                .takes_value(true)
                .default_value("solc"),
        )
        .arg(
            Arg::with_name("runs")
                .long("runs")
                .value_name("N")
                .help("Optimizer runs passed to solc")
                .takes_value(true)
                .default_value("200"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log every recognized construct"),
        )
        .get_matches();

    init_tracing(matches.is_present("verbose"));

    let input_file = matches
        .value_of("INPUT")
        .ok_or_else(|| anyhow!("missing input file"))?;
    let output_dir = matches.value_of("output").unwrap_or(".");

    let source = fs::read_to_string(input_file)
        .with_context(|| format!("Failed to read input file: {}", input_file))?;

    let mut result = pyvax::transpile(&source);

    if matches.is_present("compile") {
        let runs = matches
            .value_of("runs")
            .unwrap_or("200")
            .parse()
            .with_context(|| "Optimizer runs must be a number")?;
        let solc = Solc::new(matches.value_of("solc").unwrap_or("solc"));
        result = compile_result(result, &solc, Optimizer { enabled: true, runs });
    }

    if matches.is_present("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for warning in result.warnings.iter().flatten() {
        tracing::warn!("{}", warning);
    }

    if !result.success {
        let errors = result.errors.unwrap_or_default().join("\n");
        bail!("Failed to transpile {}:\n{}", input_file, errors);
    }

    let contract_name = result
        .metadata
        .as_ref()
        .map(|m| m.contract_name.clone())
        .unwrap_or_else(|| String::from("Contract"));
    let solidity = result.solidity.as_deref().unwrap_or_default();

    let output_file = Path::new(output_dir).join(format!("{}.sol", contract_name));
    fs::write(&output_file, solidity)
        .with_context(|| format!("Failed to write output file: {}", output_file.display()))?;

    if let Some(bytecode) = &result.bytecode {
        let bin_file = Path::new(output_dir).join(format!("{}.bin", contract_name));
        fs::write(&bin_file, bytecode)
            .with_context(|| format!("Failed to write output file: {}", bin_file.display()))?;
    }
    if let Some(abi) = &result.abi {
        let abi_file = Path::new(output_dir).join(format!("{}.abi.json", contract_name));
        fs::write(&abi_file, serde_json::to_string_pretty(abi)?)
            .with_context(|| format!("Failed to write output file: {}", abi_file.display()))?;
    }

    println!(
        "Successfully converted {} to {}",
        contract_name,
        output_file.display()
    );

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
