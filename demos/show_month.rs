use holical::render::CalendarRenderer;
use holical::source::parse;
use holical::HolidayStore;
/// example to print a month from an inline dataset, without cache or network
use std::env::args;
fn main() {
    let args: Vec<String> = args().collect();
    let year: i32 = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(2025);
    let month: u32 = args.get(2).and_then(|a| a.parse().ok()).unwrap_or(5);
    let dataset = "国民の祝日・休日月日,国民の祝日・休日名称
2025/1/1,元日
2025/1/13,成人の日
2025/2/11,建国記念の日
2025/2/23,天皇誕生日
2025/2/24,休日
2025/3/20,春分の日
2025/4/29,昭和の日
2025/5/3,憲法記念日
2025/5/4,みどりの日
2025/5/5,こどもの日
2025/5/6,休日
";
    let mut store = HolidayStore::new();
    store.load(parse(dataset).holidays);
    let renderer = CalendarRenderer::default();
    match renderer.render(year, month, &store) {
        Ok(view) => print!("{}", view),
        Err(e) => eprintln!("{}", e),
    }
}
