//! Command-line argument definitions for the Xsdvi CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input schemas and diagram roots,
//! the output directory and stylesheet handling, configuration file
//! selection, and logging verbosity.

use clap::{ArgGroup, Parser};

use xsdvi::schema::ComponentKind;

/// Command-line arguments for the Xsdvi schema diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("style").multiple(false)))]
pub struct Args {
    /// Paths to the input XSD files
    #[arg(required = true, help = "Paths to the input XSD files")]
    pub inputs: Vec<String>,

    /// Name of the root element or type; `all` draws one diagram per
    /// top-level component
    #[arg(short, long = "root-node-name")]
    pub root_node_name: Option<String>,

    /// Draw only the root and its direct content
    #[arg(long)]
    pub one_node_only: bool,

    /// Directory the SVG files are written to
    #[arg(short, long = "output-path", default_value = ".")]
    pub output_path: String,

    /// Kinds of components eligible as roots (element, type)
    #[arg(long, value_delimiter = ',', default_value = "element")]
    pub root_types: Vec<ComponentKind>,

    /// Embed the stylesheet in every document
    #[arg(long, group = "style")]
    pub embody_style: bool,

    /// Write the stylesheet to this file and link it from every document
    #[arg(long, group = "style", value_name = "FILE")]
    pub generate_style: Option<String>,

    /// Link every document to the stylesheet at this URL
    #[arg(long, group = "style", value_name = "URL")]
    pub use_style: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["xsdvi", "order.xsd"]).unwrap();

        assert_eq!(args.inputs, ["order.xsd"]);
        assert_eq!(args.root_node_name, None);
        assert!(!args.one_node_only);
        assert_eq!(args.output_path, ".");
        assert_eq!(args.root_types, [ComponentKind::ElementDeclaration]);
        assert!(!args.embody_style);
    }

    #[test]
    fn test_root_types_list() {
        let args =
            Args::try_parse_from(["xsdvi", "a.xsd", "--root-types", "element,type"]).unwrap();

        assert_eq!(
            args.root_types,
            [ComponentKind::ElementDeclaration, ComponentKind::TypeDefinition]
        );
        assert!(Args::try_parse_from(["xsdvi", "a.xsd", "--root-types", "group"]).is_err());
    }

    #[test]
    fn test_style_options_conflict() {
        let result = Args::try_parse_from([
            "xsdvi",
            "a.xsd",
            "--embody-style",
            "--use-style",
            "http://example.com/xsdvi.css",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_inputs_required() {
        assert!(Args::try_parse_from(["xsdvi"]).is_err());
    }
}
