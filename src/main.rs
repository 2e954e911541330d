//! `jschema <schema> [<instance>...]`: compiles a schema and validates zero or more
//! instance documents against it, exiting non-zero on the first failure.
//!
//! Grounded on `original_source/cmd/jv/main.go`, which does the same thing against
//! `jsonschema.Compile`/`Validate`. Bare arguments (no `scheme://` prefix) are treated
//! as local file paths, since that's how every caller of the original actually uses it.
use std::process;

use structopt::StructOpt;

use jschema::{load, CancellationToken, JSONSchema};

#[derive(StructOpt)]
#[structopt(name = "jschema", about = "Validate JSON documents against a JSON Schema")]
struct Opt {
    /// URL or file path of the schema to compile.
    schema: String,
    /// URLs or file paths of documents to validate against the schema.
    instances: Vec<String>,
}

fn as_url(arg: &str) -> String {
    if arg.contains("://") {
        arg.to_owned()
    } else {
        format!("file://{}", arg)
    }
}

fn main() {
    let opt = Opt::from_args();

    let compiled = match JSONSchema::options().compile_url(&as_url(&opt.schema)) {
        Ok(compiled) => compiled,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let token = CancellationToken::new();
    for instance_arg in &opt.instances {
        let url = as_url(instance_arg);
        let bytes = match load(&token, &url) {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!("error in reading {:?}. reason:\n{}", instance_arg, err);
                process::exit(1);
            }
        };
        let instance: serde_json::Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                eprintln!("error in reading {:?}. reason:\n{}", instance_arg, err);
                process::exit(1);
            }
        };
        if let Err(err) = compiled.validate(&instance) {
            eprintln!("{:?} does not conform to the schema specified. reason:\n{}", instance_arg, err);
            process::exit(1);
        }
    }
}
