use maxflow::max_flow::{max_flow, mocks, utils};

fn main() {
    env_logger::init();

    let capacity = mocks::mock_textbook_network();
    utils::draw(&capacity.to_graph());

    match max_flow(&capacity, 0, 5) {
        Ok(result) => {
            for path in &result.history {
                println!("{}", path);
            }
            println!("max flow = {}", result.value);
            utils::draw_with_flow(&capacity, &result.flow(&capacity));
        }
        Err(e) => eprintln!("error: {}", e),
    }
}
