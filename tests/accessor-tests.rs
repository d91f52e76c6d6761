use std::collections::{BTreeMap, HashMap};

use property_accessor::{
    get_value, get_value_with, record, Accessor, MissingPolicy, Navigable, Options,
};

struct Person {
    name: String,
}

struct Book {
    author: String,
    title: Option<String>,
    price: u32,
    written: HashMap<String, i64>,
    tags: Vec<String>,
}

struct Store {
    owner: Person,
    name: String,
    books: Vec<Book>,
}

impl Store {
    fn book(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.title.as_deref() == Some(title))
    }
}

record!(Person { name });
record!(Book { author, title, price, written, tags });
record!(Store { owner, name, books } keyed { book });

fn book(author: &str, title: Option<&str>, price: u32, year: i64, tags: &[&str]) -> Book {
    Book {
        author: author.to_owned(),
        title: title.map(String::from),
        price,
        written: HashMap::from([(String::from("year"), year)]),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn store() -> Store {
    let _ = env_logger::builder().is_test(true).try_init();

    Store {
        owner: Person {
            name: String::from("John Doe"),
        },
        name: String::from("Foomart"),
        books: vec![
            book("Nigel Rees", None, 9, 1996, &["asdf", "asdf2"]),
            book("Evelyn Waugh", Some("Sword of Honour"), 13, 1997, &["foo", "bar"]),
        ],
    }
}

fn string(value: Option<&dyn Navigable>) -> Option<&str> {
    value.and_then(|v| v.as_str())
}

#[test]
fn object_is_missing() {
    let nothing: Option<Store> = None;
    let err = get_value(&nothing, "name").unwrap_err();
    assert!(err.is_argument());
    assert_eq!(err.msg, "object is required");
}

#[test]
fn path_is_missing() {
    let err = get_value(&store(), "").unwrap_err();
    assert!(err.is_argument());
    assert_eq!(err.msg, "path is required");
}

#[test]
fn simple_property() {
    let store = store();
    assert_eq!(string(get_value(&store, "name").unwrap()), Some("Foomart"));
}

#[test]
fn nested_property() {
    let store = store();
    assert_eq!(
        string(get_value(&store, "owner.name").unwrap()),
        Some("John Doe")
    );
}

#[test]
fn indexed_property() {
    let store = store();
    assert_eq!(
        string(get_value(&store, "books[0].author").unwrap()),
        Some("Nigel Rees")
    );
    assert_eq!(
        string(get_value(&store, "books[-1].author").unwrap()),
        Some("Evelyn Waugh")
    );
    assert_eq!(
        string(get_value(&store, "books[1].tags[-2]").unwrap()),
        Some("foo")
    );
}

#[test]
fn indexed_property_with_no_name() {
    let err = get_value(&store(), "[0].author").unwrap_err();
    assert!(err.is_type());
    assert_eq!(
        err.msg,
        "value is expected to be an array-like, got `Store` instead"
    );
}

#[test]
fn indexed_property_with_invalid_index() {
    let err = get_value(&store(), "books[meh].author").unwrap_err();
    assert!(err.is_syntax());
    assert!(err.msg.starts_with("could not parse index as integer"));
}

#[test]
fn indexed_property_on_array() {
    let root: Vec<Box<dyn Navigable>> = vec![
        Box::new("foo") as Box<dyn Navigable>,
        Box::new(vec!["bar", "baz"]),
    ];
    assert_eq!(string(get_value(&root, "[0]").unwrap()), Some("foo"));
    assert_eq!(string(get_value(&root, "[1][0]").unwrap()), Some("bar"));
    assert_eq!(string(get_value(&root, "[1][-1]").unwrap()), Some("baz"));
    assert_eq!(string(get_value(&root, "[1][-2]").unwrap()), Some("bar"));
}

#[test]
fn index_out_of_range_is_absent() {
    let root = vec![1_i64, 2, 3];
    assert!(get_value(&root, "[3]").unwrap().is_none());
    assert!(get_value(&root, "[-4]").unwrap().is_none());
    assert_eq!(get_value(&root, "[-3]").unwrap().and_then(|v| v.as_i64()), Some(1));
}

#[test]
fn indexed_property_on_string() {
    let err = get_value(&store(), "name[0]").unwrap_err();
    assert!(err.is_type());
    assert_eq!(
        err.msg,
        "property `name` is expected to be an array-like, got `String` instead"
    );
}

#[test]
fn mapped_property() {
    let store = store();
    let year = get_value(&store, "books[0].written(year)").unwrap();
    assert_eq!(year.and_then(|v| v.as_i64()), Some(1996));

    let price = get_value(&store, "book(Sword of Honour).price").unwrap();
    assert_eq!(price.and_then(|v| v.as_i64()), Some(13));
}

#[test]
fn mapped_property_with_no_name() {
    let err = get_value(&store(), "(Sword of Honour).price").unwrap_err();
    assert!(err.is_type());
    assert_eq!(
        err.msg,
        "value is expected to be a map-like, got `Store` instead"
    );
}

#[test]
fn keyed_accessor_miss() {
    let store = store();
    assert!(get_value(&store, "book(Nope)").unwrap().is_none());

    let err = get_value(&store, "book(Nope).price").unwrap_err();
    assert!(err.is_no_such_property());
    assert_eq!(
        err.msg,
        "unexpected nil value for property `book(Nope)` in path `book(Nope).price`"
    );
}

#[test]
fn mapped_property_on_map() {
    let flat = HashMap::from([(String::from("foo"), String::from("bar"))]);
    assert_eq!(string(get_value(&flat, "(foo)").unwrap()), Some("bar"));

    let nested = HashMap::from([(
        String::from("foo"),
        HashMap::from([(String::from("bar"), String::from("baz"))]),
    )]);
    assert_eq!(string(get_value(&nested, "(foo)(bar)").unwrap()), Some("baz"));
    assert_eq!(string(get_value(&nested, "foo.bar").unwrap()), Some("baz"));
    assert_eq!(string(get_value(&nested, "foo(bar)").unwrap()), Some("baz"));

    let empty_key = BTreeMap::from([(String::new(), String::from("foobar"))]);
    assert_eq!(string(get_value(&empty_key, "()").unwrap()), Some("foobar"));
}

#[test]
fn mapped_property_on_record() {
    let err = get_value(&store(), "owner(foobar)").unwrap_err();
    assert!(err.is_type());
    assert_eq!(
        err.msg,
        "property `owner` is expected to be a map-like, got `Person` instead"
    );
}

#[test]
fn unknown_property() {
    let store = store();
    assert!(get_value(&store, "foobar").unwrap().is_none());

    let err = get_value(&store, "foobar.baz").unwrap_err();
    assert!(err.is_no_such_property());
}

#[test]
fn nil_interior_value() {
    let err = get_value(&store(), "books[0].title.upcase").unwrap_err();
    assert!(err.is_no_such_property());
    assert_eq!(
        err.msg,
        "unexpected nil value for property `title` in path `books[0].title.upcase`"
    );
    assert_eq!(
        err.to_string(),
        "no such property: unexpected nil value for property `title` in path `books[0].title.upcase`"
    );
}

#[test]
fn nil_interior_value_passthrough() {
    let options = Options::new().on_missing_intermediate(MissingPolicy::Passthrough);
    let store = store();
    let rv = get_value_with(&store, "books[0].title.upcase", options).unwrap();
    assert!(rv.is_none());
}

#[test]
fn nil_final_value() {
    let store = store();
    for options in [Options::strict(), Options::lenient()] {
        let rv = get_value_with(&store, "books[0].title", options).unwrap();
        assert!(rv.is_none());
    }
}

#[test]
fn type_errors_are_raised_under_passthrough() {
    let err = get_value_with(&store(), "name[0]", Options::lenient()).unwrap_err();
    assert!(err.is_type());
}

#[test]
fn results_are_not_copied() {
    let store = store();

    let owner = get_value(&store, "owner").unwrap().unwrap();
    assert!(std::ptr::eq(
        owner.downcast_ref::<Person>().unwrap(),
        &store.owner
    ));

    let books = get_value(&store, "books").unwrap().unwrap();
    assert!(std::ptr::eq(
        books.downcast_ref::<Vec<Book>>().unwrap(),
        &store.books
    ));

    let sword = get_value(&store, "book(Sword of Honour)").unwrap().unwrap();
    assert!(std::ptr::eq(
        sword.downcast_ref::<Book>().unwrap(),
        &store.books[1]
    ));
}

#[test]
fn parse_once_evaluate_many() {
    let accessor = Accessor::new("owner.name").unwrap();
    let mut other = store();
    other.owner.name = String::from("Jane Roe");

    let first = store();
    assert_eq!(string(accessor.get_value(&first).unwrap()), Some("John Doe"));
    assert_eq!(string(accessor.get_value(&other).unwrap()), Some("Jane Roe"));
}

#[test]
fn shared_between_threads() {
    let accessor = Accessor::new("books[1].written(year)").unwrap();
    let stores: Vec<Store> = (0..4).map(|_| store()).collect();

    std::thread::scope(|s| {
        for store in stores.iter() {
            let accessor = &accessor;
            s.spawn(move || {
                let year = accessor.get_value(store).unwrap();
                assert_eq!(year.and_then(|v| v.as_i64()), Some(1997));
            });
        }
    });
}
