use vergen::EmitBuilder;
use std::process::Command;

fn main() {
    // Git metadata is only available when building from a checkout
    let in_checkout = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    let result = if in_checkout {
        EmitBuilder::builder()
            .build_timestamp()
            .git_sha(true)
            .emit()
    } else {
        EmitBuilder::builder()
            .build_timestamp()
            .emit()
    };

    result.expect("Unable to generate ticket-desk build metadata");
}
