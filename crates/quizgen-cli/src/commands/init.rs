//! The `quizgen init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quizgen.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("sample-quiz.txt"), SAMPLE_QUIZ)?;

    println!("\nNext steps:");
    println!("  1. Edit quizgen.toml with your server URL or API keys");
    println!("  2. Run: quizgen parse --input sample-quiz.txt");
    println!("  3. Run: quizgen generate --input notes.txt --num-questions 5");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizgen configuration

default_provider = "server"
default_model = ""
default_schema = "mcq"
default_difficulty = "medium"
default_num_questions = 10
default_num_options = 4
default_temperature = 0.7
max_retries = 3
retry_delay_ms = 1000

[providers.server]
type = "server"
base_url = "http://localhost:8000"
token = "${QUIZGEN_TOKEN}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"
"#;

const SAMPLE_QUIZ: &str = "Question 1
What is the capital of France?
Options:
A) Paris
B) Berlin
C) Madrid
D) Rome
Answer: Paris

Question 2
Which planet is known as the Red Planet?
Options:
A) Venus
B) Mars
C) Jupiter
D) Saturn
Answer: Mars

Question 3
What gas do plants absorb from the air?
Options:
A) Oxygen
B) Nitrogen
C) Carbon dioxide
D) Helium
Answer: Carbon dioxide
";
