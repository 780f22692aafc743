use rocks_lang::literal::Literal;
use rocks_lang::token::{Location, Token, Type};

#[test]
fn location_display() {
    let location = Location::new(2, 5);
    assert_eq!("2:5", location.to_string());
}

#[test]
fn token_display_without_literal() {
    let token = Token::new(Type::LeftParen, "(".to_string(), None, Location::new(1, 3));
    assert_eq!("LeftParen ( None @ 1:3", token.to_string());
}

#[test]
fn token_display_with_literal() {
    let token = Token::new(
        Type::Number,
        "5".to_string(),
        Some(Literal::Number(5.0)),
        Location::new(0, 0),
    );
    assert_eq!("Number 5 Some(\n    Number(\n        5.0,\n    ),\n) @ 0:0", token.to_string());
}

#[test]
fn tokens_hash_by_location_not_just_lexeme() {
    use std::collections::HashMap;

    let a = Token::new(Type::Identifier, "x".to_string(), None, Location::new(0, 0));
    let b = Token::new(Type::Identifier, "x".to_string(), None, Location::new(1, 0));

    let mut map = HashMap::new();
    map.insert(a.clone(), 1usize);
    map.insert(b.clone(), 2usize);

    assert_eq!(Some(&1), map.get(&a));
    assert_eq!(Some(&2), map.get(&b));
}
