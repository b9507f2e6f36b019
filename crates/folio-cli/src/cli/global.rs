/// Global flags available before or after subcommands.
#[derive(Clone, Debug, Default)]
pub struct GlobalFlags {
    pub index: Option<String>,
    pub modules: Option<String>,
    pub annotations: Option<String>,
    pub compact: bool,
    pub quiet: bool,
    pub verbose: bool,
}
