//! CLI logic for the Xsdvi schema diagram tool.
//!
//! This module contains the core CLI logic: checking the inputs, choosing
//! the stylesheet, and drawing one SVG file per (input, root) pair.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{error, info, log, warn};

use xsdvi::{
    DiagramBuilder, STYLESHEET, XsdviError,
    config::{AppConfig, DiagramOptions, RootSelection, StyleConfig},
};

/// Outcome of a run that got past the up-front checks.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// SVG files written, in processing order.
    pub written: Vec<PathBuf>,
    /// Errors of the (input, root) pairs that could not be drawn.
    pub failures: Vec<XsdviError>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the Xsdvi CLI application
///
/// Every input is loaded and walked from each requested root, and each
/// resulting diagram is written to `<output-path>/<name>.svg`. A pair that
/// fails does not stop the others; its error is collected in the returned
/// [`RunSummary`].
///
/// # Errors
///
/// Returns `XsdviError` for problems that stop the whole run:
/// - An input file that does not exist
/// - Configuration loading errors
/// - Output directory or stylesheet writing errors
pub fn run(args: &Args) -> Result<RunSummary, XsdviError> {
    info!(
        inputs:? = args.inputs,
        output_path = args.output_path;
        "Processing schemas"
    );

    for input in &args.inputs {
        if !Path::new(input).is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("input file `{input}` does not exist"),
            )
            .into());
        }
    }

    let app_config = config::load_config(args.config.as_ref())?;

    let output_dir = PathBuf::from(&args.output_path);
    fs::create_dir_all(&output_dir)?;

    let app_config = apply_style_args(app_config, args, &output_dir)?;
    let builder = DiagramBuilder::new(app_config);

    let base_options = DiagramOptions::new(
        args.root_node_name
            .as_deref()
            .map_or(RootSelection::Schema, RootSelection::from_name),
    )
    .with_root_kinds(args.root_types.clone())
    .with_one_node_only(args.one_node_only);

    let mut summary = RunSummary::default();
    for input in &args.inputs {
        process_input(&builder, input, &base_options, &output_dir, &mut summary);
    }

    info!(
        written = summary.written.len(),
        failed = summary.failures.len();
        "Processing finished"
    );
    Ok(summary)
}

/// Overrides the configured style with the style flags, if any was given.
fn apply_style_args(
    config: AppConfig,
    args: &Args,
    output_dir: &Path,
) -> Result<AppConfig, XsdviError> {
    if let Some(file) = &args.generate_style {
        let path = output_dir.join(file);
        fs::write(&path, STYLESHEET)?;
        info!(path = path.display().to_string(); "Stylesheet written");
        return Ok(config.with_style(StyleConfig::link(file.as_str())));
    }

    if let Some(url) = &args.use_style {
        return Ok(config.with_style(StyleConfig::link(url.as_str())));
    }

    if args.embody_style {
        return Ok(config.with_style(StyleConfig::embody()));
    }

    Ok(config)
}

fn process_input(
    builder: &DiagramBuilder,
    input: &str,
    base_options: &DiagramOptions,
    output_dir: &Path,
    summary: &mut RunSummary,
) {
    let loaded = match builder.load(input) {
        Ok(loaded) => loaded,
        Err(err) => {
            error!(input; "Schema could not be loaded");
            summary.failures.push(err);
            return;
        }
    };

    for diagnostic in loaded.diagnostics() {
        log!(diagnostic.severity().log_level(), "{input}: {diagnostic}");
    }

    let diagrams = base_options.expand(loaded.model());
    if diagrams.is_empty() {
        warn!(input; "No top-level components of the requested kinds");
    }

    for options in &diagrams {
        let Some(tree) = builder.build_tree(loaded.model(), options) else {
            continue;
        };

        let output = output_dir.join(output_file_name(input, options));
        let written = builder
            .render_svg(&tree, options)
            .and_then(|svg| fs::write(&output, svg).map_err(XsdviError::from));

        match written {
            Ok(()) => {
                info!(output_file = output.display().to_string(); "SVG exported successfully");
                summary.written.push(output);
            }
            Err(err) => {
                error!(input, root:? = options.root(); "Diagram could not be written");
                summary.failures.push(err);
            }
        }
    }
}

/// File name of the diagram drawn from `input` with `options`.
///
/// A named root drawn alone gets its own name; any other diagram is named
/// after the input file, without a trailing `.xsd`.
pub fn output_file_name(input: &str, options: &DiagramOptions) -> String {
    if options.one_node_only() {
        if let Some(root) = options.root_name() {
            return format!("{root}.svg");
        }
    }

    let name = Path::new(input)
        .file_name()
        .map_or_else(|| input.to_string(), |name| name.to_string_lossy().into_owned());

    let stem = match name.len().checked_sub(4) {
        Some(i) if name.get(i..).is_some_and(|ext| ext.eq_ignore_ascii_case(".xsd")) => {
            &name[..i]
        }
        _ => name.as_str(),
    };
    format!("{stem}.svg")
}
