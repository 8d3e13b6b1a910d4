use std::ffi::OsString;
use std::io::Read;

use anyhow::{Context, Result};
use html::{Node, NodeKind, ScanError};
use tracing::{info, span, warn, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

struct Args {
    /// File to scan, stdin when absent or `-`
    pub input: Option<String>,
    /// Extra levels of inner content to re-scan
    pub depth: usize,
    pub serialize: bool,
    pub trace: bool,
    /// Arguments left over after the ones above
    pub extra: Vec<OsString>,
}

fn main() -> Result<()> {
    let args = parse_args(pico_args::Arguments::from_env()).context("Could not parse arguments")?;
    if args.trace {
        tracing_subscriber::fmt::fmt()
            .with_span_events(FmtSpan::ACTIVE)
            .with_max_level(Level::TRACE)
            .with_env_filter(EnvFilter::from_default_env())
            .finish()
            .init();
        info!("Logger initialized");
    }
    if !args.extra.is_empty() {
        warn!("Ignoring extra arguments: {:?}", args.extra);
    }

    let markup = read_input(args.input.as_deref())?;
    let nodes = html::parse(&markup).context("Could not parse markup")?;
    let output = if args.serialize {
        nodes.iter().map(Node::serialize).collect()
    } else {
        outline(&nodes, args.depth).context("Could not parse inner content")?
    };
    print!("{}", output);
    Ok(())
}

fn parse_args(mut pargs: pico_args::Arguments) -> Result<Args, pico_args::Error> {
    let depth = pargs.opt_value_from_str(["-d", "--depth"])?.unwrap_or(0);
    let serialize = pargs.contains(["-s", "--serialize"]);
    let trace = pargs.contains(["-t", "--trace"]);
    let input = pargs.opt_free_from_str()?;
    Ok(Args {
        input,
        depth,
        serialize,
        trace,
        extra: pargs.finish(),
    })
}

fn read_input(path: Option<&str>) -> Result<String> {
    let span = span!(Level::DEBUG, "Reading input", "{}", path.unwrap_or("-"));
    let _enter = span.enter();
    match path {
        None | Some("-") => {
            let mut markup = String::new();
            std::io::stdin()
                .read_to_string(&mut markup)
                .context("Could not read stdin")?;
            Ok(markup)
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Could not read {}", path))
        }
    }
}

/// One line per node, re-scanning elements `levels` more times
fn outline(nodes: &[Node], levels: usize) -> Result<String, ScanError> {
    let mut out = String::new();
    write_outline(&mut out, nodes, levels, 0)?;
    Ok(out)
}

fn write_outline(
    out: &mut String,
    nodes: &[Node],
    levels: usize,
    indent: usize,
) -> Result<(), ScanError> {
    for node in nodes {
        let pad = "  ".repeat(indent);
        match node.kind() {
            NodeKind::Text => {
                out.push_str(&format!("{}{:?}\n", pad, node.inner_content));
            }
            NodeKind::Element if levels > 0 => {
                out.push_str(&format!("{}{}>\n", pad, node.open_tag()));
                write_outline(out, &node.children()?, levels - 1, indent + 1)?;
            }
            _ => {
                out.push_str(&format!("{}{}\n", pad, node));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[test]
fn test_outline() {
    let nodes = html::parse("<ul class=list><li>a</li><!--x--><li>b<br></li></ul>tail").unwrap();
    assert_eq!(
        outline(&nodes, 0).unwrap(),
        "<ul class='list'><li>a</li><!--x--><li>b<br></li></ul>\n\"tail\"\n"
    );
    assert_eq!(
        outline(&nodes, 1).unwrap(),
        "<ul class='list'>\n  <li>a</li>\n  <!--x-->\n  <li>b<br></li>\n\"tail\"\n"
    );
    assert_eq!(
        outline(&nodes, 2).unwrap(),
        "<ul class='list'>\n  <li>\n    \"a\"\n  <!--x-->\n  <li>\n    \"b\"\n    <br/>\n\"tail\"\n"
    );
}

#[cfg(test)]
#[test]
fn test_outline_inner_error() {
    let nodes = html::parse("<div><p>a</span></div>").unwrap();
    assert!(outline(&nodes, 0).is_ok());
    assert!(matches!(
        outline(&nodes, 1),
        Err(ScanError::TagMismatch { .. })
    ));
}

#[cfg(test)]
#[test]
fn test_parse_args() {
    let argv = ["-t", "--depth", "2", "page.html", "stray"];
    let pargs = pico_args::Arguments::from_vec(argv.iter().map(OsString::from).collect());
    let args = parse_args(pargs).unwrap();
    assert_eq!(args.input.as_deref(), Some("page.html"));
    assert_eq!(args.depth, 2);
    assert!(args.trace);
    assert!(!args.serialize);
    // Left for main to report once logging is set up
    assert_eq!(args.extra, vec![OsString::from("stray")]);

    let args = parse_args(pico_args::Arguments::from_vec(vec![])).unwrap();
    assert_eq!(args.input, None);
    assert_eq!(args.depth, 0);
    assert!(args.extra.is_empty());
}
