use lliw::Fg;
use wlangage::render::lines;
use wlangage::{Category, TokOpt};

pub static CODE: &str = "\
/*
Procédure de démonstration
*/
PROCÉDURE Saluer(sNom est une chaîne)
\t// Les mots-clés sont insensibles à la casse
\tSI sNom <> \"\" ALORS
\t\tInfo(\"Bonjour \" + sNom + \" ! 你好\")
\tSINON
\t\tRENVOYER Faux
\tFIN
\tfenêtre.Titre = sNom
\tnCompteur est un entier = -5
\tnCompteur += 1
";

fn main() {
    let grammar = wlangage::from_extension("wl").unwrap();
    let spans = grammar.run(CODE);
    for (y, line) in lines(&spans, CODE, 4).into_iter().enumerate() {
        print!("{: <3} |", y);
        for token in line {
            match token {
                TokOpt::Some(text, kind) => print!("{}{text}{}", colour(kind), Fg::Reset),
                TokOpt::None(text) => print!("{text}"),
            }
        }
        println!();
    }
}

fn colour(kind: Category) -> Fg {
    match kind {
        Category::Comment => Fg::Rgb(128, 128, 128),
        Category::String | Category::Number => Fg::Rgb(186, 104, 200),
        Category::VariableAssignment | Category::AssignmentKeyword => Fg::Rgb(166, 168, 171),
        Category::Type => Fg::Rgb(149, 117, 205),
        Category::Visibility => Fg::Rgb(79, 195, 247),
        Category::Keyword | Category::ProcedureKeyword | Category::Important => {
            Fg::Rgb(255, 128, 0)
        }
        Category::ProcedureName => Fg::Rgb(0, 145, 128),
        Category::Function => Fg::Rgb(145, 181, 254),
        Category::Procedure
        | Category::Property
        | Category::Operator
        | Category::Punctuation => Fg::Rgb(205, 211, 222),
    }
}
