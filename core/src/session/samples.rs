//! session/samples.rs
//! Built-in demo inputs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Text,
    Json,
    Csv,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub file_name: &'static str,
    pub kind: SampleKind,
    pub data: String,
}

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nullam auctor, nisl eget ultricies tincidunt, \
nisl nisl aliquam nisl, eget aliquam nisl nisl eget nisl. Nullam auctor, nisl eget ultricies tincidunt, nisl nisl aliquam nisl, \
eget aliquam nisl nisl eget nisl. Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nullam auctor, nisl eget ultricies tincidunt, \
nisl nisl aliquam nisl, eget aliquam nisl nisl eget nisl. Nullam auctor, nisl eget ultricies tincidunt, nisl nisl aliquam nisl, \
eget aliquam nisl nisl eget nisl.";

const USERS_JSON: &str = r#"{
  "users": [
    { "id": 1, "name": "John Doe", "email": "john@example.com", "role": "admin", "active": true },
    { "id": 2, "name": "Jane Smith", "email": "jane@example.com", "role": "user", "active": true },
    { "id": 3, "name": "Bob Johnson", "email": "bob@example.com", "role": "user", "active": false }
  ],
  "settings": { "theme": "dark", "notifications": true, "language": "en-US" }
}"#;

const USERS_CSV: &str = "id,name,email,role,active
1,John Doe,john@example.com,admin,true
2,Jane Smith,jane@example.com,user,true
3,Bob Johnson,bob@example.com,user,false
4,Alice Brown,alice@example.com,user,true
5,Charlie Davis,charlie@example.com,user,false";

const HTML_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Sample HTML</title>
</head>
<body>
  <div class="container">
    <h1>Sample HTML Page</h1>
    <p>This is a sample HTML page that has been compressed with LZ4.</p>
    <ul>
      <li>Fast compression and decompression</li>
      <li>Low memory requirements</li>
      <li>Suitable for real-time compression</li>
    </ul>
  </div>
</body>
</html>"#;

pub fn samples() -> Vec<Sample> {
    vec![
        Sample {
            id: "lorem-ipsum",
            name: "Lorem Ipsum Text",
            description: "A sample of Lorem Ipsum text",
            file_name: "lorem-ipsum.txt",
            kind: SampleKind::Text,
            data: LOREM.repeat(10),
        },
        Sample {
            id: "json-data",
            name: "JSON Data",
            description: "A sample of JSON data",
            file_name: "data.json",
            kind: SampleKind::Json,
            data: USERS_JSON.to_string(),
        },
        Sample {
            id: "csv-data",
            name: "CSV Data",
            description: "A sample of CSV data",
            file_name: "users.csv",
            kind: SampleKind::Csv,
            data: USERS_CSV.to_string(),
        },
        Sample {
            id: "html-snippet",
            name: "HTML Snippet",
            description: "A sample HTML document",
            file_name: "sample.html",
            kind: SampleKind::Html,
            data: HTML_PAGE.to_string(),
        },
    ]
}

pub fn sample_by_id(id: &str) -> Option<Sample> {
    samples().into_iter().find(|sample| sample.id == id)
}
