//! Integration tests for loading scripted models from disk.

use datagent_abstraction::{Content, Model, ModelRequest};
use datagent_models::ScriptedModel;
use std::io::Write;

#[tokio::test]
async fn test_scripted_model_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[responses]]
question = "total revenue in 2024?"
reply = "SELECT SUM(revenue) FROM sales WHERE year = 2024"

[[responses]]
question = "top customer?"
reply = "SELECT customer FROM sales GROUP BY customer ORDER BY SUM(revenue) DESC LIMIT 1"
"#
    )
    .unwrap();

    let model = ScriptedModel::from_file("scripted", file.path()).unwrap();
    assert_eq!(model.len(), 2);
    assert_eq!(model.model_id(), "scripted");

    let request = ModelRequest::new(vec![
        Content::user("total revenue in 2024?"),
        Content::model("SELECT SUM(revenue) FROM sales WHERE year = 2024"),
        Content::user("top customer?"),
    ]);
    let response = model.generate_content(&request).await.unwrap();
    assert_eq!(
        response.primary_text(),
        Some("SELECT customer FROM sales GROUP BY customer ORDER BY SUM(revenue) DESC LIMIT 1")
    );
    assert_eq!(response.usage.map(|u| u.completion_tokens), Some(13));
}
