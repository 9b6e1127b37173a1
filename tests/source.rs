use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn plain_label_becomes_book() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("bkb")?
        .env("NO_COLOR", "1")
        .args(["source", "--offline", "Dejiny Slovenska"])
        .assert()
        .success()
        .stdout("Dejiny Slovenska (kniha)\n");
    Ok(())
}

#[test]
fn pdf_label_warns_and_keeps_url() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("bkb")?
        .env("NO_COLOR", "1")
        .args(["source", "--offline", "https://x.test/paper.pdf"])
        .assert()
        .success()
        .stdout("Page title was not found (pdf)\nhttps://x.test/paper.pdf\n")
        .stderr(predicate::str::contains("warning: Page title was not found"));
    Ok(())
}

#[test]
fn digital_library_label() -> Result<(), Box<dyn std::error::Error>> {
    let link = "https://digitalna-kniznica.beliana.sav.sk/mgd/view?title=Beliana&cv=page_7";
    Command::cargo_bin("bkb")?
        .env("NO_COLOR", "1")
        .args(["source", "--offline", link])
        .assert()
        .success()
        .stdout(format!("Beliana , page 7 (DK EnÚ)\n{link}\n"));
    Ok(())
}

#[test]
fn unreachable_page_fails() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("bkb")?
        .env("NO_COLOR", "1")
        .args(["source", "--offline", "https://example.com/article"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains(
            "The URL given in the source is incorrect",
        ));
    Ok(())
}
