use std::error::Error;
use std::process::Command;

const FILE_NAME: &str = "./demos/loop.lj";

#[test]
fn dump_prints_ast_instead_of_running() -> Result<(), Box<dyn Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_lj"))
        .args(["--dump", FILE_NAME])
        .output()?;

    let stdout = std::str::from_utf8(&output.stdout)?;
    assert!(stdout.contains("ForStmt"));
    assert!(output.status.success());

    Ok(())
}
