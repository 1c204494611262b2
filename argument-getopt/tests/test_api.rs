use argument_getopt::{parse, Kind, Opt};

#[test]
fn test_opt_both() {
    let opt = Opt::new("test", 't', Kind::Required);
    assert!(opt.is_short('t'));
    assert!(!opt.is_short('x'));
    assert!(opt.is_long("test"));
    assert!(!opt.is_long("other"));
    assert!(opt.is_either('x', "test"));
    assert!(opt.is_either('t', "other"));
    assert!(!opt.is_either('x', "other"));
    assert_eq!(opt.kind(), Kind::Required);
    assert_eq!(opt.to_string(), "-t/--test");
}

#[test]
fn test_opt_short() {
    let opt = Opt::short('a', Kind::None);
    assert!(opt.is_short('a'));
    assert!(!opt.is_long("a"));
    assert_eq!(opt.long_name(), None);
    assert_eq!(opt.to_string(), "-a");
    assert_eq!(Opt::new("", 'a', Kind::None), opt);
}

#[test]
fn test_opt_long() {
    let opt = Opt::long("test", Kind::Optional);
    assert!(opt.is_long("test"));
    assert!(!opt.is_short('\0'));
    assert_eq!(opt.short_name(), None);
    assert_eq!(opt.to_string(), "--test");
    assert_eq!(Opt::new("test", '\0', Kind::Optional), opt);
}

#[test]
fn test_opt_without_names() {
    let opt = Opt::new("", '\0', Kind::None);
    assert_eq!(opt.long_name(), None);
    assert_eq!(opt.short_name(), None);
    assert!(!opt.is_long(""));
    assert_eq!(opt.to_string(), "");
}

#[test]
fn test_kind_default() {
    assert_eq!(Kind::default(), Kind::None);
}

#[test]
fn test_match() {
    let table = [Opt::new("number", 'n', Kind::Required)];
    let args = ["", "-n42"];
    let parsed = parse(&table, &args);
    let m = parsed.matches.into_iter().next().unwrap();
    assert_eq!(m.opt(), &table[0]);
    assert!(m.is_short('n'));
    assert!(m.is_long("number"));
    assert!(m.is_either('x', "number"));
    assert!(!m.is_either('x', "other"));
    assert_eq!(m.optarg(), "42");
    assert_eq!(m.into_optarg(), "42");
}
