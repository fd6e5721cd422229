fn saturate(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

impl From<crate::Position> for lsp_types::Position {
    fn from(pos: crate::Position) -> lsp_types::Position {
        lsp_types::Position::new(saturate(pos.line), saturate(pos.character))
    }
}

impl From<lsp_types::Position> for crate::Position {
    fn from(pos: lsp_types::Position) -> crate::Position {
        crate::Position::new(pos.line as usize, pos.character as usize)
    }
}

impl From<crate::Range> for lsp_types::Range {
    fn from(range: crate::Range) -> lsp_types::Range {
        lsp_types::Range::new(range.start.into(), range.end.into())
    }
}

impl From<lsp_types::Range> for crate::Range {
    fn from(range: lsp_types::Range) -> crate::Range {
        crate::Range::new(range.start.into(), range.end.into())
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn ranges_convert_both_ways() {
        let range = crate::Range::new(crate::Position::new(3, 1), crate::Position::new(3, 9));
        let lsp: lsp_types::Range = range.into();

        assert_eq!(lsp.start.line, 3);
        assert_eq!(lsp.end.character, 9);
        assert_eq!(crate::Range::from(lsp), range);
    }
}
