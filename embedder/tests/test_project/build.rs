use embedder::build::{Config, Layout};

fn main() {
    Config::new("Assets")
        .namespace("demo")
        .text("Readme", "blobs/readme.txt")
        .binary("Data", "blobs/data.bin")
        .text("Empty", "blobs/empty.txt")
        .build()
        .expect("Failed to embed assets");

    // Shares the `demo` namespace with `Assets`.
    Config::new("Other")
        .namespace("demo")
        .file("Table", "blobs/table.csv")
        .text("Empty", "blobs/empty.txt")
        .binary("Data", "blobs/data.bin")
        .build()
        .expect("Failed to embed other assets");

    Config::from_manifest("embed.toml")
        .expect("Failed to read embed.toml")
        .layout(Layout::Natural)
        .build()
        .expect("Failed to embed manifest assets");
}
