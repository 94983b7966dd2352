//! JobForge CLI
//!
//! Usage:
//!   jobforge [OPTIONS] [FILE]
//!
//! Options:
//!   -j, --job <NAME>            Job to resolve (defaults to the only job)
//!   -p, --platform <PLATFORM>   Target platform (defaults to the host)
//!   -P <KEY=VALUE>              Parameter override (repeatable)
//!   -a, --agent-profile <FILE>  Agent profile (TOML format)
//!   -l, --list                  List jobs and their prompted parameters
//!   -c, --check                 Parse and validate only
//!   -g, --grammar               Show language grammar reference
//!   -e, --examples              Show annotated examples
//!   -h, --help                  Print help

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use jobforge::{
    compile, resolve_with, AgentProfile, ForgeError, JobRegistry, ParamKind, Platform,
    ResolvedJob, Visibility,
};

#[derive(Parser)]
#[command(name = "jobforge")]
#[command(about = "Declarative job templates for CI builds")]
struct Cli {
    /// Definition file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Job to resolve (defaults to the only job in the file)
    #[arg(short, long)]
    job: Option<String>,

    /// Platform to resolve for: linux, windows, or macos (defaults to the host)
    #[arg(short, long)]
    platform: Option<String>,

    /// Parameter override (repeatable)
    #[arg(short = 'P', value_name = "KEY=VALUE")]
    param: Vec<String>,

    /// Agent profile file (TOML format)
    #[arg(short, long)]
    agent_profile: Option<PathBuf>,

    /// List jobs and their prompted parameters
    #[arg(short, long)]
    list: bool,

    /// Parse and validate only
    #[arg(short, long)]
    check: bool,

    /// Print just the resolved command line
    #[arg(long)]
    command_only: bool,

    /// Show language grammar reference
    #[arg(short, long)]
    grammar: bool,

    /// Show annotated examples
    #[arg(short, long)]
    examples: bool,
}

fn main() {
    let cli = Cli::parse();

    // Handle documentation flags first
    if cli.grammar {
        print_grammar();
        return;
    }

    if cli.examples {
        print_examples();
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let input_name = cli
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());

    // Compile the definition file
    let registry = match compile(&source) {
        Ok(registry) => registry,
        Err(ForgeError::Parse(errors)) => {
            for err in &errors {
                eprintln!("{}", err.format(&source, &input_name));
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.check {
        println!("ok: {} job(s)", registry.len());
        return;
    }

    if cli.list {
        print_jobs(&registry);
        return;
    }

    // Load agent profile
    let profile = match &cli.agent_profile {
        Some(path) => match AgentProfile::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading profile '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => AgentProfile::default(),
    };

    // Pick the job to resolve
    let job = match &cli.job {
        Some(name) => name.clone(),
        None => match registry.names().as_slice() {
            [] => {
                eprintln!("Error: the definition file declares no jobs");
                std::process::exit(1);
            }
            [only] => only.to_string(),
            names => {
                eprintln!(
                    "Error: {} jobs declared, pick one with --job (available: {})",
                    names.len(),
                    names.join(", ")
                );
                std::process::exit(1);
            }
        },
    };

    // Pick the platform
    let platform = match &cli.platform {
        Some(text) => match text.parse::<Platform>() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Platform::host(),
    };

    // Collect -P overrides
    let mut overrides = BTreeMap::new();
    for raw in &cli.param {
        match raw.split_once('=') {
            Some((key, value)) => {
                overrides.insert(key.to_string(), value.to_string());
            }
            None => {
                eprintln!("Error: invalid override '{}', expected KEY=VALUE", raw);
                std::process::exit(1);
            }
        }
    }

    let resolved = match resolve_with(&registry, &job, platform, &overrides, &profile) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Overrides the job does not declare are dropped by resolution
    for key in overrides.keys() {
        if !resolved.parameters.contains_key(key) {
            eprintln!("Warning: job {} does not declare parameter {}", job, key);
        }
    }

    if cli.command_only {
        println!("{}", resolved.command_line);
    } else {
        print_resolved(&resolved);
    }
}

fn print_jobs(registry: &JobRegistry) {
    for template in registry.iter() {
        match template.display_name() {
            Some(display) => println!("{} - {}", template.name(), display),
            None => println!("{}", template.name()),
        }

        let platforms: Vec<String> = template
            .supported_platforms()
            .iter()
            .map(|p| p.to_string())
            .collect();
        println!("  platforms: {}", platforms.join(", "));

        let prompts: Vec<_> = template
            .params()
            .iter()
            .filter(|s| s.visibility == Visibility::Prompt)
            .collect();
        if !prompts.is_empty() {
            println!("  prompts:");
            for spec in prompts {
                let mut line = format!("    {} = \"{}\"", spec.name, spec.default);
                if let ParamKind::Select { options } = &spec.kind {
                    line.push_str(&format!(" ({})", options.join(" | ")));
                }
                if !spec.allow_empty {
                    line.push_str(" [required]");
                }
                if let Some(desc) = &spec.description {
                    line.push_str(&format!(" - {}", desc));
                }
                println!("{}", line);
            }
        }
    }
}

fn print_resolved(resolved: &ResolvedJob) {
    println!("job: {} ({})", resolved.job, resolved.platform);
    if !resolved.parameters.is_empty() {
        println!("parameters:");
        for (name, value) in &resolved.parameters {
            println!("  {} = {}", name, value);
        }
    }
    if !resolved.env.is_empty() {
        println!("environment:");
        for (name, value) in &resolved.env {
            println!("  {} = {}", name, value);
        }
    }
    println!("command:");
    println!("  {}", resolved.command_line);
}

fn print_intro() {
    println!(
        r#"JobForge - Declarative job templates for CI builds

USAGE:
    jobforge [OPTIONS] [FILE]
    cat jobs.job | jobforge --list

OPTIONS:
    -j, --job <NAME>            Job to resolve (defaults to the only job)
    -p, --platform <PLATFORM>   linux, windows, or macos (defaults to the host)
    -P <KEY=VALUE>              Parameter override (repeatable)
    -a, --agent-profile <FILE>  Agent profile (TOML format)
    -l, --list                  List jobs and their prompted parameters
    -c, --check                 Parse and validate only
        --command-only          Print just the resolved command line
    -g, --grammar               Show language grammar reference
    -e, --examples              Show annotated examples
    -h, --help                  Print help

QUICK START:
    echo 'job hello {{ text who "world" command "echo hello %who%" }}' | jobforge

This resolves the job for the host platform and prints its parameters,
environment, and command line. Run --grammar for syntax reference or
--examples for more patterns."#
    );
}

fn print_grammar() {
    println!(
        r#"JOBFORGE GRAMMAR
================

JOBS
----
job name ["Display Name"] {{ ... }}

A definition file declares any number of jobs. Job bodies contain
parameters, environment entries, platform blocks, and exactly one
command template.

PARAMETERS
----------
text name "default" [modifiers]
    Free-form parameter.

select name "default" from ["a", "b"] [modifiers]
    Enumerated parameter. The default must be one of the options and
    resolved values outside the option set are rejected.

Names may contain dots (additional.gradle.parameters). Modifiers go
in brackets after the declaration:

    text testProject "" [prompt, required, desc: "Target project"]

    prompt          Entered at trigger time
    required        Resolved value must be non-empty
    desc: "text"    Human-readable description

ENVIRONMENT
-----------
env NAME "value template"

Values are templates and may reference parameters (%name%) and the
agent's base environment (%env.NAME%). Entries resolve in declaration
order; an entry may extend the agent's value of its own name:

    env PATH "%env.PATH%:/opt/swift/4.2.3/usr/bin"

PLATFORM BLOCKS
---------------
platform linux {{ ... }}
platform windows, macos {{ ... }}

Bodies hold parameters and environment entries that apply on the named
platforms only. A same-name declaration replaces the job-level one; new
names are appended after the job-level ones. A job with no platform
blocks runs everywhere; a job with at least one runs only on the
platforms it names.

COMMAND
-------
command "fragment" "fragment" ...

Exactly one per job. Fragments are joined with single spaces and the
result is a template with %name% placeholders.

PLACEHOLDERS
------------
%name%        Parameter value, or an agent server parameter
%env.NAME%    Environment value (resolved entry or agent base value)

Placeholder names start with a letter or underscore and continue with
letters, digits, underscores, and dots. A % that does not open a
well-formed placeholder stays literal. Substituted values are never
rescanned for further placeholders.

COMMENTS
--------
// line comment
/* block comment */

STRINGS
-------
Double-quoted with \n, \t, \\ and \" escapes:
    env JPROFILER_HOME "C:\\Program Files\\jprofiler""#
    );
}

fn print_examples() {
    println!(
        r#"JOBFORGE EXAMPLES
=================

EXAMPLE 1: Prompted parameters
------------------------------
job adhoc "Ad hoc performance scenario" {{
    text testProject "" [prompt, required, desc: "Target project"]
    text runs "10" [prompt]
    command "gradle clean performance:performanceAdHocTest"
            "--runs %runs% -Pproject=%testProject%"
}}

Resolve with overrides:
    jobforge -P testProject=largeJavaMultiProject -P runs=40 adhoc.job

EXAMPLE 2: Platform variants
----------------------------
job profiled {{
    text profiler ""
    platform windows {{
        text profiler "jprofiler"
        env JPROFILER_HOME "C:\\Program Files\\jprofiler"
    }}
    platform linux, macos {{
        text profiler "async-profiler"
        env FG_HOME_DIR "/opt/FlameGraph"
    }}
    command "gradle performanceAdHoc --profiler %profiler%"
}}

The same job resolves differently per platform:
    jobforge --platform windows profiled.job --command-only
    jobforge --platform linux profiled.job --command-only

EXAMPLE 3: Select parameters
----------------------------
job vendor {{
    select testJavaVendor "openjdk" from ["openjdk", "adoptopenjdk"] [prompt]
    command "gradle perf -PtestJavaVendor=%testJavaVendor%"
}}

Values outside the option set are rejected:
    jobforge -P testJavaVendor=zulu vendor.job

EXAMPLE 4: Environment and agent profiles
-----------------------------------------
job swift {{
    env PATH "%env.PATH%:/opt/swift/4.2.3/usr/bin"
    env PERFORMANCE_DB_PASSWORD_TCAGENT "%performance.db.password.tcagent%"
    command "gradle performanceExperiment"
}}

With an agent profile supplying the base PATH and server parameters:

    # agent.toml
    [env]
    PATH = "/usr/local/bin:/usr/bin:/bin"

    [parameters]
    "performance.db.password.tcagent" = "..."

    jobforge --agent-profile agent.toml swift.job"#
    );
}
