// src/board/fen_tables.rs
// O(1) FEN glyph ↔ class maps.

use super::Class;

pub(super) const CHAR_TO_CLASS: [Option<Class>; 128] = {
    let mut table: [Option<Class>; 128] = [None; 128];

    // Uppercase = White
    table['P' as usize] = Some(Class::WhitePawn);
    table['N' as usize] = Some(Class::WhiteKnight);
    table['B' as usize] = Some(Class::WhiteBishop);
    table['R' as usize] = Some(Class::WhiteRook);
    table['Q' as usize] = Some(Class::WhiteQueen);
    table['K' as usize] = Some(Class::WhiteKing);

    // Lowercase = Black
    table['p' as usize] = Some(Class::BlackPawn);
    table['n' as usize] = Some(Class::BlackKnight);
    table['b' as usize] = Some(Class::BlackBishop);
    table['r' as usize] = Some(Class::BlackRook);
    table['q' as usize] = Some(Class::BlackQueen);
    table['k' as usize] = Some(Class::BlackKing);

    table['_' as usize] = Some(Class::Empty);

    table
};

pub(super) const CLASS_TO_CHAR: [char; Class::COUNT] = {
    let mut t = ['\0'; Class::COUNT];
    t[Class::WhiteBishop as usize] = 'B';
    t[Class::WhiteKing as usize] = 'K';
    t[Class::WhiteKnight as usize] = 'N';
    t[Class::WhitePawn as usize] = 'P';
    t[Class::WhiteQueen as usize] = 'Q';
    t[Class::WhiteRook as usize] = 'R';
    t[Class::Empty as usize] = '_';
    t[Class::BlackBishop as usize] = 'b';
    t[Class::BlackKing as usize] = 'k';
    t[Class::BlackKnight as usize] = 'n';
    t[Class::BlackPawn as usize] = 'p';
    t[Class::BlackQueen as usize] = 'q';
    t[Class::BlackRook as usize] = 'r';
    t
};
