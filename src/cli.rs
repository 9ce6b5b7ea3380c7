use clap::{value_parser, crate_version, Arg, ArgAction, Command, ValueHint};

const IN_HELP: &str = "if the tape image is piped, omit `--dimg` option";
const AT_HELP: &str = "coordinates use two decimal fields, e.g. `01.13` is bank 1 block 13";

fn dimg_arg(req: bool) -> Arg {
    Arg::new("dimg").short('d').long("dimg").help("path to tape image itself")
        .value_name("PATH")
        .value_hint(ValueHint::FilePath)
        .required(req)
}

fn indent_arg() -> Arg {
    Arg::new("indent").long("indent").help("JSON indentation, omit to minify")
        .value_name("SPACES")
        .value_parser(value_parser!(u16).range(0..16))
        .required(false)
}

pub fn build_cli() -> Command {
    let long_help = "p2kit is always invoked with exactly one of several subcommands.
The subcommands are generally designed to function as nodes in a pipeline.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
list the files:        `p2kit catalog -d mytape.bin`
machine readable list: `p2kit catalog -d mytape.bin --json | jq`
walk a single chain:   `cat mytape.bin | p2kit walk -a 00.05`
extract a cassette:    `p2kit get -f BASIC85 -d mytape.bin > basic85.cas`";

    let mut main_cmd = Command::new("p2kit")
        .about("Recovers files from P2000T cassette tape dumps.")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("catalog")
        .arg(dimg_arg(false))
        .arg(Arg::new("json").long("json").help("structured output instead of a table")
            .action(ArgAction::SetTrue))
        .arg(indent_arg())
        .visible_alias("ls")
        .visible_alias("dir")
        .visible_alias("cat")
        .about("walk every chain on the tape and list the files")
        .after_help(IN_HELP));
    main_cmd = main_cmd.subcommand(Command::new("scan")
        .arg(dimg_arg(false))
        .about("list the raw chain-start candidates, one coordinate per line")
        .after_help(IN_HELP));
    main_cmd = main_cmd.subcommand(Command::new("walk")
        .arg(Arg::new("at").short('a').long("at").help("start coordinate as `bank.block`")
            .value_name("COORD")
            .required(true))
        .arg(dimg_arg(false))
        .about("walk one chain and print the decoded header")
        .after_help([IN_HELP,"\n",AT_HELP].concat()));
    main_cmd = main_cmd.subcommand(Command::new("get")
        .arg(Arg::new("file").short('f').long("file").help("name of file on the tape")
            .value_name("NAME")
            .required(true))
        .arg(dimg_arg(false))
        .about("assemble a file's blocks into a CAS cassette on stdout")
        .after_help(IN_HELP));
    main_cmd = main_cmd.subcommand(Command::new("dump")
        .arg(Arg::new("bank").short('b').long("bank").help("bank index")
            .value_name("BANK")
            .value_parser(value_parser!(u8).range(0..8))
            .required(true))
        .arg(dimg_arg(false))
        .about("hex display of a bank's metadata slot region")
        .after_help(IN_HELP));
    return main_cmd;
}
