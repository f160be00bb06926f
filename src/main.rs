use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use ngx_config::cli::{BuildArgs, Cli, Commands, FormatArgs, LexArgs, MinifyArgs, ParseArgs};
use ngx_config::{
    build, build_files, format_file, lex_file, minify_file, parse_file, BuildOptions, ParseError,
    ParseOptions, Payload, Registry,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lex(args) => run_lex(args),
        Commands::Parse(args) => run_parse(args),
        Commands::Build(args) => run_build(args),
        Commands::Format(args) => run_format(args),
        Commands::Minify(args) => run_minify(args),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }
}

fn run_lex(args: LexArgs) -> Result<(), String> {
    let registry = Registry::standard();
    let tokens = lex_file(&args.input, &registry).map_err(|e| e.to_string())?;

    let value = if args.line_numbers {
        serde_json::Value::Array(
            tokens
                .iter()
                .map(|t| serde_json::json!([t.text, t.line]))
                .collect(),
        )
    } else {
        serde_json::Value::Array(
            tokens
                .iter()
                .map(|t| serde_json::Value::String(t.text.clone()))
                .collect(),
        )
    };

    let text = to_json(&value, args.indent)?;
    write_output(args.out.as_deref(), &text)
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let registry = Registry::standard();
    let on_error: Option<fn(&ParseError) -> serde_json::Value> = if args.tb_onerror {
        Some(|err| serde_json::Value::String(err.to_string()))
    } else {
        None
    };
    let options = ParseOptions {
        on_error,
        catch_errors: !args.no_catch,
        ignore: args.ignore.clone(),
        single_file: args.single_file,
        comments: args.include_comments,
        strict: args.strict,
        combine: args.combine,
        ..Default::default()
    };

    let payload = parse_file(&args.input, &registry, &options).map_err(|e| e.to_string())?;
    let value = serde_json::to_value(&payload).map_err(|e| e.to_string())?;
    let text = to_json(&value, args.indent)?;
    write_output(args.out.as_deref(), &text)
}

fn run_build(args: BuildArgs) -> Result<(), String> {
    let text = fs::read_to_string(&args.input)
        .map_err(|e| format!("failed to read {}: {}", args.input.display(), e))?;
    let payload: Payload = serde_json::from_str(&text)
        .map_err(|e| format!("invalid JSON payload in {}: {}", args.input.display(), e))?;

    let registry = Registry::standard();
    let options = BuildOptions {
        indent: args.indent,
        tabs: args.tabs,
        header: !args.no_headers,
    };

    if args.stdout {
        for config in &payload.config {
            println!("# {}", config.file.display());
            println!("{}", build(&config.parsed, &registry, &options));
            println!();
        }
        return Ok(());
    }

    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| e.to_string())?,
    };

    if !args.force {
        let existing: Vec<String> = payload
            .config
            .iter()
            .map(|config| output_path(&dir, &config.file))
            .filter(|path| path.exists())
            .map(|path| path.display().to_string())
            .collect();
        if !existing.is_empty() {
            return Err(format!(
                "refusing to overwrite existing files (pass --force): {}",
                existing.join(", ")
            ));
        }
    }

    build_files(&payload, Some(&dir), &registry, &options).map_err(|e| e.to_string())?;

    let written: Vec<String> = payload
        .config
        .iter()
        .map(|config| output_path(&dir, &config.file).display().to_string())
        .collect();
    eprintln!(
        "{} wrote {} file(s): {}",
        "success:".green().bold(),
        written.len(),
        written.join(", ")
    );
    Ok(())
}

fn run_format(args: FormatArgs) -> Result<(), String> {
    let registry = Registry::standard();
    let output =
        format_file(&args.input, &registry, args.indent, args.tabs).map_err(|e| e.to_string())?;
    write_output(args.out.as_deref(), &output)
}

fn run_minify(args: MinifyArgs) -> Result<(), String> {
    let registry = Registry::standard();
    let output = minify_file(&args.input, &registry).map_err(|e| e.to_string())?;
    write_output(args.out.as_deref(), &output)
}

fn output_path(dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        dir.join(file)
    }
}

fn to_json(value: &serde_json::Value, indent: Option<usize>) -> Result<String, String> {
    match indent {
        None => serde_json::to_string(value).map_err(|e| e.to_string()),
        Some(width) => {
            let spaces = " ".repeat(width);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(spaces.as_bytes());
            let mut buf = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value
                .serialize(&mut serializer)
                .map_err(|e| e.to_string())?;
            String::from_utf8(buf).map_err(|e| e.to_string())
        }
    }
}

fn write_output(out: Option<&Path>, content: &str) -> Result<(), String> {
    let mut content = content.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    match out {
        Some(path) => fs::write(path, content)
            .map_err(|e| format!("failed to write {}: {}", path.display(), e)),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
