use anyhow::Context;
use javagen::builder::{ClassBuilder, Method, TypeTag};
use javagen::style::style;
use javagen::{loader, print};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "javagen", about = "Inspect compiled Java classes and generate source stubs")]
enum Command {
    /// Pretty-print the contents of one compiled class file
    Inspect {
        /// Path to a .class file
        #[structopt(parse(from_os_str))]
        file: PathBuf,
    },

    /// Load every class file under a directory, reporting failures per file
    Scan {
        /// Root directory to walk
        #[structopt(parse(from_os_str))]
        dir: PathBuf,
    },

    /// Generate a Java class skeleton
    Stub {
        /// Package of the new class, e.g. ler.robot.commands
        #[structopt(long)]
        package: String,

        /// Simple name of the new class
        #[structopt(long)]
        name: String,

        /// Fully-qualified superclass to extend
        #[structopt(long)]
        extends: Option<String>,

        /// Fully-qualified interfaces to implement
        #[structopt(long = "implements")]
        implements: Vec<String>,

        /// Base source directory to write into
        #[structopt(long, parse(from_os_str), default_value = ".")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Command::from_args() {
        Command::Inspect { file } => {
            let class = loader::load_class(&file)
                .with_context(|| format!("failed to load {}", file.display()))?;
            print::print_class(&class);
        }

        Command::Scan { dir } => {
            let results = loader::load_directory(&dir);
            let mut failed = 0;
            for (path, result) in &results {
                match result {
                    Ok(class) => println!("{}  {}", path.display(), class.detail.dotted()),
                    Err(err) => {
                        failed += 1;
                        println!(
                            "{}  {}",
                            path.display(),
                            style("error").paint(format!("error: {}", err))
                        );
                    }
                }
            }
            println!("{} classes, {} failed", results.len(), failed);
        }

        Command::Stub {
            package,
            name,
            extends,
            implements,
            out,
        } => {
            let mut builder = ClassBuilder::new(&package, &name, classfile::access::Scope::Public);
            builder.doc = Some(format!("Auto-generated skeleton for {}.", name));
            builder.superclass = extends.as_deref().map(TypeTag::from_qualified);
            builder.interfaces = implements
                .iter()
                .map(|interface| TypeTag::from_qualified(interface))
                .collect();
            builder.methods.push(Method::constructor(
                Vec::new(),
                classfile::access::Scope::Public,
                "// TODO: Auto-generated constructor stub",
            ));

            let path = builder
                .write(&out)
                .with_context(|| format!("failed to write under {}", out.display()))?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
