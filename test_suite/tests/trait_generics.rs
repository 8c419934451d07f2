#[test]
fn test1() {
    #[genmock::generate_mock]
    trait Trait<T> {
        fn f(&self, arg: T) -> T;
    }

    let m = TraitMock::<String>::new();
    m.mocks.f.returns_with(|(arg,)| arg.repeat(2));

    assert_eq!(m.f("ab".to_owned()), "abab");
}

#[test]
fn test2() {
    #[genmock::generate_mock]
    trait Trait<K, V>
    where
        K: std::hash::Hash + Eq,
    {
        fn get(&self, key: K) -> Option<V>;
        fn put(&mut self, key: K, value: V);
    }

    let mut m = TraitMock::<String, u32>::new();
    m.mocks.put.returns(());
    m.mocks.get.returns(Some(1));

    m.put("one".to_owned(), 1);
    assert_eq!(m.get("one".to_owned()), Some(1));
    assert_eq!(m.mocks.put.calls(), vec![("one".to_owned(), 1)]);
}

#[test]
fn test3() {
    #[genmock::generate_mock]
    trait Trait<const N: usize> {
        fn chunk(&self) -> [u8; N];
    }

    let m = TraitMock::<4>::new();
    m.mocks.chunk.returns([1; 4]);

    assert_eq!(m.chunk(), [1, 1, 1, 1]);
}

#[test]
fn test4() {
    #[genmock::generate_mock]
    trait Trait<T: Clone = String> {
        #[genmock(property)]
        fn value(&self) -> T;
    }

    fn read<T: Trait>(t: &T) -> String {
        t.value()
    }

    let m = TraitMock::<String>::new();
    m.set_value("default".to_owned());

    assert_eq!(read(&m), "default");
}
