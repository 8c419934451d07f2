#[test]
fn test1() {
    #[genmock::generate_mock]
    trait Trait {
        #[genmock(property)]
        fn name(&self) -> String;
    }

    let m = TraitMock::new();
    m.set_name("Ferris".to_owned());

    assert_eq!(m.name(), "Ferris");
    assert_eq!(m.name(), "Ferris");
    assert_eq!(m.mocks.name.call_count(), 2);
    assert_eq!(m.mocks.name.calls(), vec!["Ferris".to_owned()]);
}

#[test]
fn test2() {
    #[genmock::generate_mock]
    trait Trait {
        #[genmock(property)]
        fn count(&self) -> u32;
    }

    let m = TraitMock::new();
    m.mocks.count.returns(7);
    assert_eq!(m.count(), 7);

    m.set_count(8);
    assert_eq!(m.count(), 8);
}

#[test]
fn test3() {
    #[genmock::generate_mock]
    trait Trait {
        #[genmock(property)]
        fn state(&self) -> Option<String>;
    }

    let m = TraitMock::new();
    m.set_state(None);
    m.mocks.state.returns_once(Some("booting".to_owned()));

    assert_eq!(m.state(), Some("booting".to_owned()));
    assert_eq!(m.state(), None);
}

#[test]
#[should_panic(expected = "no result configured for `name`")]
fn test4() {
    #[genmock::generate_mock]
    trait Trait {
        #[genmock(property)]
        fn name(&self) -> String;
    }

    let m = TraitMock::new();
    m.name();
}

#[test]
fn test5() {
    #[genmock::generate_mock]
    trait Trait {
        #[genmock(property)]
        fn name(&self) -> String;

        fn greet(&self) -> String;
    }

    fn greet_twice(t: &dyn Trait) -> String {
        format!("{} {}", t.greet(), t.name())
    }

    let m = TraitMock::new();
    m.set_name("Ferris".to_owned());
    m.mocks.greet.returns("Hi".to_owned());

    assert_eq!(greet_twice(&m), "Hi Ferris");
}

#[test]
fn test6() {
    #[genmock::generate_mock]
    trait Trait {
        #[genmock(property)]
        fn id(&self) -> u64;
    }

    let m = TraitMock::new();
    m.set_id(1);
    m.mocks.id.reset();

    assert!(!m.mocks.id.was_called());
    assert!(m.mocks.id.calls().is_empty());
}

#[test]
fn test7() {
    use std::cell::Cell;
    use std::rc::Rc;

    #[genmock::generate_mock]
    trait Trait {
        #[genmock(property)]
        fn shared(&self) -> Rc<u8>;

        #[genmock(property)]
        fn flag(&self) -> Cell<bool>;
    }

    let m = TraitMock::new();
    m.mocks.shared.returns_once(Rc::new(1));
    assert_eq!(*m.shared(), 1);

    let value = Rc::new(2);
    m.set_shared(Rc::clone(&value));
    assert!(Rc::ptr_eq(&m.shared(), &value));

    m.set_flag(Cell::new(true));
    assert!(m.flag().get());
    assert_eq!(m.mocks.flag.call_count(), 1);
}
