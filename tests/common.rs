use anyhow::Result;
use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use indoc::indoc;

pub const TOKENS: &str = indoc! {r#"
    {
        "534e2b02": {"SF_RFID": "534e2b02", "SF_ValueRating": 3, "SF_MemoryType": "Technical", "SF_Group": ""},
        "hos001": {"SF_RFID": "hos001", "SF_ValueRating": 1, "SF_MemoryType": "Personal", "SF_Group": "Family (x2)"}
    }
"#};

pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?.into_persistent_if(false))
}

pub fn write_file(temp: &TempDir, path: &str, content: &str) -> Result<()> {
    temp.child(path).write_str(content)?;
    Ok(())
}

/// The binary, run inside `temp` as the project root.
pub fn create_cmd(temp: &TempDir, args: &[&str]) -> Result<Command> {
    let mut cmd = Command::cargo_bin("token-sync")?;
    cmd.current_dir(temp.path());
    cmd.args(args);
    Ok(cmd)
}
