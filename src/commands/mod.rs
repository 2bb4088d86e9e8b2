pub type CmdResult<T> = rebrand::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// `--config` override for the rebrand.json location.
    pub config: Option<String>,
}

pub mod config;
pub mod rename;
