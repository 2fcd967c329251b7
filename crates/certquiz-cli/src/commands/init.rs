//! The `certquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create certquiz.toml
    if std::path::Path::new("certquiz.toml").exists() {
        println!("certquiz.toml already exists, skipping.");
    } else {
        std::fs::write("certquiz.toml", SAMPLE_CONFIG)?;
        println!("Created certquiz.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("data")?;
    let bank_path = std::path::Path::new("data/questions.json");
    if bank_path.exists() {
        println!("data/questions.json already exists, skipping.");
    } else {
        std::fs::write(bank_path, EXAMPLE_BANK)?;
        println!("Created data/questions.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your questions to data/questions.json");
    println!("  2. Run: certquiz validate");
    println!("  3. Run: certquiz take");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# certquiz configuration

question_bank = "data/questions.json"
results_dir = "results"
questions_per_test = 40
"#;

const EXAMPLE_BANK: &str = r#"[
  {
    "question": "Which AWS service provides durable object storage?",
    "options": [
      {"letter": "A", "text": "Amazon S3"},
      {"letter": "B", "text": "Amazon EC2"},
      {"letter": "C", "text": "Amazon RDS"},
      {"letter": "D", "text": "AWS Lambda"}
    ],
    "correct_answer": "A"
  },
  {
    "question": "Which TWO services are serverless compute options?",
    "options": [
      {"letter": "A", "text": "AWS Lambda"},
      {"letter": "B", "text": "Amazon EC2"},
      {"letter": "C", "text": "AWS Fargate"},
      {"letter": "D", "text": "Amazon Lightsail"}
    ],
    "correct_answer": ["A", "C"]
  },
  {
    "question": "Which service is a managed relational database?",
    "options": [
      {"letter": "A", "text": "Amazon DynamoDB"},
      {"letter": "B", "text": "Amazon RDS"},
      {"letter": "C", "text": "Amazon S3"},
      {"letter": "D", "text": "Amazon SQS"}
    ],
    "correct_answer": "B"
  }
]
"#;
