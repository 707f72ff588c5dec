use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    comfyup completions bash > ~/.bash_completion.d/comfyup\n\n\
                  Generate zsh completions:\n    comfyup completions zsh > ~/.zfunc/_comfyup\n\n\
                  Generate PowerShell completions:\n    comfyup completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
