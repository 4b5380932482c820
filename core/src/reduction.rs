use crate::{ProductionId, Token, TokenData};

/// The handle of a production, as it was popped off the parse stack.
///
/// The tokens keep the order of the production's handle. The tag is left
/// to the caller, typically to attach the value computed for the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction<V> {
    production: ProductionId,
    tokens: Vec<Token<V>>,
    tag: Option<V>,
}

impl<V> Reduction<V> {
    pub fn new(production: ProductionId, tokens: Vec<Token<V>>) -> Self {
        Self {
            production,
            tokens,
            tag: None,
        }
    }

    pub fn production(&self) -> ProductionId {
        self.production
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, index: usize) -> Option<&Token<V>> {
        self.tokens.get(index)
    }

    pub fn token_mut(&mut self, index: usize) -> Option<&mut Token<V>> {
        self.tokens.get_mut(index)
    }

    pub fn tokens(&self) -> &[Token<V>] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token<V>> {
        self.tokens
    }

    /// The data of the token at `index`.
    pub fn data(&self, index: usize) -> Option<&TokenData<V>> {
        self.token(index).map(|tok| &tok.data)
    }

    /// Replace the data of the token at `index`, returning the previous data.
    ///
    /// Returns `None`, and drops `data`, if there is no such token.
    pub fn set_data(&mut self, index: usize, data: TokenData<V>) -> Option<TokenData<V>> {
        self.token_mut(index)
            .map(|tok| std::mem::replace(&mut tok.data, data))
    }

    pub fn tag(&self) -> Option<&V> {
        self.tag.as_ref()
    }

    pub fn set_tag(&mut self, tag: V) -> Option<V> {
        self.tag.replace(tag)
    }

    pub fn take_tag(&mut self) -> Option<V> {
        self.tag.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn reduction() -> Reduction<i32> {
        Reduction::new(
            0,
            vec![
                Token::text(9, "true", Position::default()),
                Token::text(6, "||", Position::new(0, 5)),
                Token::text(10, "false", Position::new(0, 8)),
            ],
        )
    }

    #[test]
    fn test_accessors() {
        let red = reduction();
        assert_eq!(red.production(), 0);
        assert_eq!(red.len(), 3);
        assert_eq!(red.token(1).and_then(Token::as_text), Some("||"));
        assert!(red.token(3).is_none());
    }

    #[test]
    fn test_set_data() {
        let mut red = reduction();
        let previous = red.set_data(0, TokenData::Value(1));

        assert_eq!(previous, Some(TokenData::Text("true".into())));
        assert_eq!(red.data(0), Some(&TokenData::Value(1)));
        assert_eq!(red.set_data(5, TokenData::Value(2)), None);
    }

    #[test]
    fn test_tag() {
        let mut red = reduction();
        assert!(red.tag().is_none());
        assert_eq!(red.set_tag(7), None);
        assert_eq!(red.set_tag(8), Some(7));
        assert_eq!(red.take_tag(), Some(8));
        assert!(red.tag().is_none());
    }
}
