//! `new <kind>`: generators for module content.

use clap::{Args, Subcommand};

#[allow(dead_code)]
#[derive(Subcommand)]
pub enum NewAction {
    /// Create a new class named <name>
    Class(NamedArgs),
    /// Create a new defined type named <name>
    #[command(name = "defined_type")]
    DefinedType(NamedArgs),
    /// Create a new custom fact named <name>
    Fact(OptionalNameArgs),
    /// Create a new function named <name>
    Function(FunctionArgs),
    /// Create a new module named [module_name]
    Module(ModuleArgs),
    /// Create a new ruby provider named <name>
    Provider(NamedArgs),
    /// Create a new task named <name>
    Task(TaskArgs),
    /// Create a new test for the object named <name>
    Test(TestArgs),
    /// Create a new ruby transport named <name>
    Transport(NamedArgs),
}

#[allow(dead_code)]
#[derive(Args)]
pub struct NamedArgs {
    /// Name of the new object
    pub name: String,
}

#[allow(dead_code)]
#[derive(Args)]
pub struct OptionalNameArgs {
    /// Name of the new object
    pub name: Option<String>,
}

#[allow(dead_code)]
#[derive(Args)]
pub struct FunctionArgs {
    /// Name of the function
    pub name: String,
    /// Function type: native or v4
    #[arg(long = "type", value_name = "TYPE", value_parser = ["native", "v4"])]
    pub function_type: Option<String>,
}

#[allow(dead_code)]
#[derive(Args)]
pub struct ModuleArgs {
    /// Module name, optionally prefixed with the Forge namespace
    pub module_name: Option<String>,
    /// Directory to create the module in
    pub target_dir: Option<String>,
    /// Template to create the module from
    #[arg(long, value_name = "URL")]
    pub template_url: Option<String>,
    /// Git ref of the template
    #[arg(long, value_name = "REF")]
    pub template_ref: Option<String>,
    /// License for the new module
    #[arg(long, value_name = "IDENTIFIER")]
    pub license: Option<String>,
    /// Only ask for information that cannot be determined automatically
    #[arg(long, conflicts_with = "full_interview")]
    pub skip_interview: bool,
    /// Ask for every metadata question
    #[arg(long)]
    pub full_interview: bool,
}

#[allow(dead_code)]
#[derive(Args)]
pub struct TaskArgs {
    /// Name of the task
    pub name: String,
    /// Short description of the task
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,
}

#[allow(dead_code)]
#[derive(Args)]
pub struct TestArgs {
    /// Class or defined type to test
    pub name: Option<String>,
    /// Create a unit test
    #[arg(long)]
    pub unit: bool,
}
