embedder::include_embedded!("Assets", "Other");
embedder::include_embedded!("FromManifest");

fn main() {
    let readme = demo::Assets::Readme
        .as_str()
        .expect("readme is not valid UTF-8");
    println!("{readme}");
    assert_eq!(readme, "Contents of readme.txt\nsecond line\n");

    assert_eq!(&*demo::Assets::Data, &[0x00, 0x01, 0x02, 0xff, 0xfe]);
    assert_eq!(demo::Assets::Data.offset(), readme.len());
    assert!(demo::Assets::Empty.is_empty());
    assert_eq!(demo::Assets::Empty.offset(), readme.len() + 5);

    assert_eq!(demo::Other::Table.as_bytes(), b"a,b\n1,2\n");
    assert!(demo::Other::Empty.is_empty());
    assert_eq!(demo::Other::Empty.offset(), 8);
    assert_eq!(demo::Other::Data.offset(), 8);
    assert_eq!(&*demo::Other::Data, &*demo::Assets::Data);

    assert_eq!(manifest::FromManifest::Table.as_bytes(), b"a,b\n1,2\n");
    assert_eq!(
        manifest::FromManifest::Raw.as_bytes(),
        b"Contents of readme.txt\r\nsecond line\r\n"
    );

    println!("Embedded data matches original.");
}
