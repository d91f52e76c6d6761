use property_accessor::{errors::PathError, parse, Accessor};
use serde_json::json;

fn main() -> Result<(), PathError> {
    let p = parse("books[1].written(year)")?;

    println!("{:?}", p);
    println!("{}", p);

    let store = json!({
        "name": "Foomart",
        "books": [
            {"author": "Nigel Rees", "written": {"year": 1996}},
            {"author": "Evelyn Waugh", "written": {"year": 1997}}
        ]
    });

    let year = Accessor::from_parsed(p, Default::default()).get_value(&store)?;
    println!("{:?}", year.and_then(|v| v.as_i64()));

    Ok(())
}
